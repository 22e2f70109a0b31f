/// Authentication wire types for the `auth` endpoint
pub mod auth;
/// Request payload types
pub mod requests;
/// Normalized response shapes returned by the client
pub mod responses;
/// Retry policy for transport-level failures
pub mod retry;
