//! Session and authentication
//!
//! Keeps the bearer token and its client-side expiry watermark in an
//! injected store, validates against the token's own `exp` claim, and
//! refreshes through the marketplace API when both allow it.

pub mod clock;
mod error;
pub mod flow;
pub mod guard;
pub mod session;
pub mod store;
pub mod tokens;

pub use flow::{login, logout, register, status};
pub use guard::require_session;
pub use session::{AuthBackend, SessionManager};
pub use store::FileSessionStore;
pub use tokens::IssuedTokens;
