//! Authentication HTTP handlers.

pub mod types;
pub mod signup;
pub mod login;
pub mod me;

pub use signup::signup;
pub use login::login;
pub use me::get_me;
