//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error
pub const USAGE: i32 = 64;

/// Template could not be rendered
pub const DATAERR: i32 = 65;

/// Required archive tool not installed
pub const UNAVAILABLE: i32 = 69;

/// Archive tool failed
pub const SOFTWARE: i32 = 70;

/// Input/output error (e.g. shell could not be spawned)
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
