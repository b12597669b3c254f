//! Standard messages shared by the error envelopes.

pub const INTERNAL_ERROR: &str = "An unexpected error occurred.";
pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const ID_REQUIRED: &str = "id is required";
