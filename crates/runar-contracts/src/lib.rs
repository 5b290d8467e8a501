//! Shared, version-pinned protocol identifiers.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable output of the interpreter. Bump the version suffix
//! whenever a field is renamed or removed; adding fields is backwards compatible.

pub const RUNAR_RUN_REPORT_SCHEMA_VERSION: &str = "runar.run.report@0.1.0";

/// Stable prefix shared by every diagnostic code (`RNR0001`, `RNR0101`, ...).
pub const RUNAR_DIAG_CODE_PREFIX: &str = "RNR";

/// Language home page, printed in `--help`.
pub const RUNAR_LANGUAGE_URL: &str = "https://esolangs.org/wiki/ᚱᚢᚾᛅᛦ";
