/**
 * Password Credentials
 *
 * Password hashing is an opaque boundary: callers hand in a plaintext and get
 * back an opaque hash, or ask whether a plaintext matches a stored hash.
 * The production implementation is bcrypt at cost 12. Hashing is slow on
 * purpose, so it runs on the blocking thread pool.
 */

use std::future::Future;
use std::pin::Pin;

use crate::backend::error::{BackendError, BackendResult};

/// Future returned by [`CredentialVerifier`] methods
pub type CredentialFuture<'a, T> = Pin<Box<dyn Future<Output = BackendResult<T>> + Send + 'a>>;

/// One-way password hashing with a verify counterpart
pub trait CredentialVerifier
where
    Self: Send + Sync,
{
    /// Hash a plaintext password
    fn hash<'a>(&'a self, plaintext: &'a str) -> CredentialFuture<'a, String>;

    /// Check a plaintext password against a stored hash
    fn verify<'a>(&'a self, plaintext: &'a str, hash: &'a str) -> CredentialFuture<'a, bool>;
}

/// bcrypt-backed [`CredentialVerifier`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    /// Work factor used in production
    pub const DEFAULT_COST: u32 = 12;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

fn hashing_failed(context: &str, detail: impl std::fmt::Debug) -> BackendError {
    tracing::error!("Password {} failed: {:?}", context, detail);
    BackendError::hashing("Could not process credentials, please try again later.")
}

impl CredentialVerifier for BcryptVerifier {
    fn hash<'a>(&'a self, plaintext: &'a str) -> CredentialFuture<'a, String> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        Box::pin(async move {
            tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
                .await
                .map_err(|e| hashing_failed("hashing", e))?
                .map_err(|e| hashing_failed("hashing", e))
        })
    }

    fn verify<'a>(&'a self, plaintext: &'a str, hash: &'a str) -> CredentialFuture<'a, bool> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();

        Box::pin(async move {
            tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
                .await
                .map_err(|e| hashing_failed("verification", e))?
                .map_err(|e| hashing_failed("verification", e))
        })
    }
}
