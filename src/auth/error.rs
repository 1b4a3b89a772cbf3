//! Session errors

use std::fmt;

/// Failures of the backing session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse session file: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("failed to serialize session: {0}")]
    Encode(#[from] toml::ser::Error),

    #[cfg(test)]
    #[error("session store lock poisoned")]
    Poisoned,
}

/// Why a session stopped being usable. Every variant sends the user
/// back to the login entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    NoSession,
    Expired,
    RefreshFailed,
    LoggedOut,
    Unreadable,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SessionEnd::NoSession => "no session",
            SessionEnd::Expired => "session expired",
            SessionEnd::RefreshFailed => "token refresh failed",
            SessionEnd::LoggedOut => "logged out",
            SessionEnd::Unreadable => "stored session unreadable",
        };
        f.write_str(reason)
    }
}
