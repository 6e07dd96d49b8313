//! HTTP handlers for the `/api/users` endpoints
//!
//! - **`types`** - Request/response bodies and signup validation
//! - **`signup`** - User registration
//! - **`login`** - Credential check and token issue
//! - **`users`** - User directory

pub mod types;
pub mod signup;
pub mod login;
pub mod users;

pub use login::login;
pub use signup::signup;
pub use users::get_users;
