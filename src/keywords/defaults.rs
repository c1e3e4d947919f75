//! Built-in interoperability vocabulary.
//!
//! Order is significant: it fixes the order of `keywords_detected` in
//! every report. Entries are matched case-insensitively, so each term
//! appears once regardless of its usual capitalisation.

pub const DEFAULT_KEYWORDS: &[&str] = &[
    // Interop and FFI
    "interop",
    "interoperability",
    "cross-language",
    "multi-language",
    "multilanguage",
    "foreign function",
    "foreign function interface",
    "FFI",
    "FFI binding",
    "FFI bindings",
    "FFI bridge",
    "FFI layer",
    "FFI wrapper",
    "foreign language interface",
    "foreign function call",
    "foreign code interface",
    "language binding",
    "language bindings",
    "language bridge",
    "interop layer",
    "native interface",
    "interop wrapper",
    "native binding",
    "native bindings",
    "platform binding",
    "platform bindings",
    "interlanguage wrapper",
    "interlanguage adapter",
    "binding generator",
    "interop toolkit",
    // Hand-written integration code
    "wrapper",
    "glue code",
    "interface adapter",
    "interface adapters",
    "custom wrapper",
    "manual wiring",
    "binding",
    "bridge",
    "stub",
    "interop code",
    "language integration layer",
    "handwritten adapter",
    "adapter layer",
    "shim layer",
    "compatibility wrapper",
    "binding layer",
    "integration scaffold",
    "integration module",
    "wrapper module",
    "bridge module",
    "intermediate wrapper",
    "proxy layer",
    "adapter pattern",
    "interop facade",
    "had to write a wrapper",
    "had to adapt manually",
    "manual integration logic",
    "glue logic",
    "hand-coded adapter",
    "language glue",
    "bridge logic",
    // Cross-language incompatibilities
    "language mismatch",
    "interface mismatch",
    "type mismatch",
    "ABI mismatch",
    "symbol not found",
    "undefined reference",
    "signature mismatch",
    "method signature mismatch",
    "incompatible types",
    "type coercion failed",
    "binary incompatibility",
    "calling convention mismatch",
    "missing symbol",
    "undefined symbol",
    "unresolved external",
    "linker error",
    "linking error",
    "symbol clash",
    "symbol conflict",
    "cannot resolve symbol",
    "failed to link",
    "undefined identifier",
    "foreign function not found",
    "module not found",
    "dll not found",
    "so not found",
    "missing foreign declaration",
    "invalid cast",
    "foreign type error",
    "type conversion error",
    "wrong arity",
    "unexpected argument type",
    "wrong type at runtime",
    // Interop frameworks and tools
    "SWIG",
    "JNI",
    "JNA",
    "JPL",
    "JSR223",
    "jsr",
    "GraalVM",
    "Truffle",
    "javacall",
    "Java Native Interface",
    "pybind11",
    "CFFI",
    "ctypes",
    "ctype",
    "NIF",
    "NAPI",
    "swi-prolog-jpl",
    "jpl.jar",
    "SWI",
    "boost.python",
    "python-cffi",
    "python bindings",
    "libffi",
    "dlopen",
    "dlsym",
    "ctypeslib",
    "node-addon-api",
    "NAN",
    "node-gyp",
    "node-ffi",
    "ffi-napi",
    "Native Implemented Function",
    "port driver",
    "Erlang port",
    "C node",
    "polyglot context",
    "GraalVM interop",
    "Graal interop",
    "Graal interoperability",
    "GraalVM interoperability",
    "IDL",
    "Interface Definition Language",
    "CORBA",
    "Thrift",
    "gRPC",
    "protobuf interop",
    "protobuf interoperability",
    "P/Invoke",
    "Platform Invocation",
    "CLR interop",
    "COM interop",
    "CLR interoperability",
    "COM interoperability",
    "DllImport",
    "cbindgen",
    "bindgen",
    "Rust FFI",
    "Rust interoperability",
    "extern \"C\"",
    // Integration problems
    "integration problem",
    "integration issue",
    "integration error",
    "errors integrating",
    "failed integration",
    "integration fails",
    "integration failed",
    "manual override",
    "configuration hell",
    "multi-build-system",
    "multiple compilers",
    "fails to integrate",
    "can't integrate",
    "unable to integrate",
    "manual integration",
    "manual glue",
    "manual config",
    "manual fix",
    "manual patch",
    "manual adjustment",
    "handwritten interop",
    "toolchain mismatch",
    "fragile integration",
    "brittle integration",
    "unstable integration",
    "hard to maintain interop",
    "interop not scalable",
    // Interface modules and syntax
    "foreign predicate",
    "interface module",
    "foreign module",
    "foreign interface",
    "interface declaration",
    "external interface",
    "interop declaration",
    "language interface",
    "interop module",
    "foreign block",
    "foreign import",
    "foreign export",
    "native declaration",
    "foreign definition",
    "external binding",
    "module binding",
    "foreign section",
];
