//! Exit code constants for the stackgen CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid invocation)
//! - 2: Validation failure (malformed descriptor)
//! - 3: I/O failure (unreadable source, unwritable destination)
//! - 4: Schema failure (structured data failed to parse)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid invocation.
pub const USER_ERROR: i32 = 1;

/// Validation failure: a descriptor violated the name constraint.
pub const VALIDATION_FAILURE: i32 = 2;

/// I/O failure: a source could not be read or a destination written.
pub const IO_FAILURE: i32 = 3;

/// Schema failure: structured data the generator owns failed to parse.
pub const SCHEMA_FAILURE: i32 = 4;
