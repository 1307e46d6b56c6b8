//! CLI Exit Code Registry
//!
//! Single source of truth for `lineage` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                               |
//! |------|-------------------------------------------------------|
//! | 0    | Success                                               |
//! | 2    | Usage error (bad arguments; also used by clap)        |
//! | 3    | Config file unreadable or invalid                     |
//! | 4    | Input file unreadable or malformed (missing column)   |
//! | 5    | Output could not be written                           |
//! | 6    | Alias shared by several nodes with `--on-collision error` |
//! | 7    | Unresolved progeny mentions with `--strict`           |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config file cannot be read, parsed, or fails validation.
pub const EXIT_CONFIG: u8 = 3;

/// Record file cannot be read, or its structure is malformed.
pub const EXIT_INPUT: u8 = 4;

/// Output document or report cannot be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Alias collision under the `error` policy.
pub const EXIT_ALIAS_COLLISION: u8 = 6;

/// `--strict` and at least one progeny mention did not resolve.
pub const EXIT_UNRESOLVED: u8 = 7;
