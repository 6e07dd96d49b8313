//! Image storage release.
//!
//! Uploading is outside this crate; a place only carries an opaque image
//! reference. When a place is deleted the reference is released through
//! [`ImageStore`].

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;

use crate::shared::image_file_name;

/// Future returned by [`ImageStore::release`]
pub type ReleaseFuture<'a> = Pin<Box<dyn Future<Output = io::Result<()>> + Send + 'a>>;

pub trait ImageStore
where
    Self: Send + Sync,
{
    /// Drop the binary behind `reference`
    fn release<'a>(&'a self, reference: &'a str) -> ReleaseFuture<'a>;
}

/// Images stored as files in one directory
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Only the final path component is honoured, so a reference can never
    /// point outside `root`.
    fn resolve(&self, reference: &str) -> io::Result<PathBuf> {
        image_file_name(reference)
            .map(|name| self.root.join(name))
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("no file name in {reference:?}")))
    }
}

impl ImageStore for DiskImageStore {
    fn release<'a>(&'a self, reference: &'a str) -> ReleaseFuture<'a> {
        Box::pin(async move {
            let path = self.resolve(reference)?;
            tokio::fs::remove_file(&path).await?;
            tracing::debug!("Removed image {}", path.display());
            Ok(())
        })
    }
}

/// Store that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImageStore;

impl ImageStore for NoopImageStore {
    fn release<'a>(&'a self, _reference: &'a str) -> ReleaseFuture<'a> {
        Box::pin(async { Ok(()) })
    }
}
