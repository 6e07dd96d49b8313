//! Authentication Module
//!
//! User accounts, password credentials and identity tokens.
//!
//! - **`users`** - User model
//! - **`credentials`** - `CredentialVerifier`: opaque bcrypt boundary
//! - **`sessions`** - `TokenAuthenticator`: HS256 tokens valid for one hour
//! - **`handlers`** - HTTP handlers for signup, login and the user list
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email and password → user stored → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` → identity attached
//!    by the middleware
//!
//! Tokens are stateless and cannot be revoked; they expire after one hour.

/// User model
pub mod users;

/// Password hashing boundary
pub mod credentials;

/// Identity token issue and verification
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use credentials::{BcryptVerifier, CredentialVerifier};
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse, UsersResponse};
pub use handlers::{get_users, login, signup};
pub use sessions::{Claims, TokenAuthenticator, TOKEN_TTL_SECS};
pub use users::User;
