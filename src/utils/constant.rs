//! # Application Constants
//!
//! This module defines limits and defaults used throughout the service.

/// Maximum length of a client name, in characters, after trimming.
pub const MAX_CLIENT_NAME_LENGTH: u64 = 200;

/// Minimum accepted length of the JWT signing secret, in characters.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Audience claim every accepted access token must carry.
pub const JWT_AUDIENCE: &str = "authenticated";

/// Number of status checks returned when `limit` is not supplied.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Upper bound applied to the `limit` query parameter.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Address the server binds to when `BIND_ADDRESS` is unset.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8090";

/// Pool size used when `DATABASE_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Body returned for every internal failure.
pub const INTERNAL_ERROR_DETAIL: &str = "An internal error occurred.";
