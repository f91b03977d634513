mod auth;
mod role;

pub use auth::*;
pub use role::*;
