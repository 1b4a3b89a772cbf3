//! Data models for marketplace entities

mod listing;
mod user;
mod wallet;

pub use listing::*;
pub use user::*;
pub use wallet::*;
