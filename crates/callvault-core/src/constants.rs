//! Application-wide constants.

/// Content type applied to uploaded recording objects.
pub const RECORDING_CONTENT_TYPE: &str = "audio/mpeg";

/// Date format used for API form fields, window labels, and CLI arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
