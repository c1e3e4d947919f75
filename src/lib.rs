//! gitcollab - cross-language collaboration difficulty on GitHub
//!
//! Finds repositories that mix two programming languages, scans their
//! README, pull requests and issues for interoperability keywords, and
//! summarizes per language pair how often integration trouble shows up.
//!
//! The scanning core ([`keywords`], [`extract`], [`scoring`], [`filter`],
//! [`aggregate`]) is pure and synchronous. [`github`] and [`pipeline`]
//! wrap it with collection and parallelism; [`inputs`] and [`reporters`]
//! handle the CSV tables.

pub mod aggregate;
pub mod config;
pub mod extract;
pub mod filter;
pub mod github;
pub mod inputs;
pub mod keywords;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
