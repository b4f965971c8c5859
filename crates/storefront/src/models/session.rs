//! Session-related types.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the CafeGo login token issued at login.
    pub const SESSION_TOKEN: &str = "session_token";
}
