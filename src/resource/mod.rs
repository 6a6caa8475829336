pub mod fs;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ReadError;

pub use fs::{FsResourceReader, ResourceContext};

/// Resolves a resource name to its text content.
///
/// One implementation per platform/storage scheme; the rest of the crate
/// depends only on this trait and receives an instance at composition time.
#[async_trait]
pub trait ResourceReader: Send + Sync {
    /// Read the resource. The name may be bare (resolved against this
    /// reader's candidate locations) or an absolute path.
    async fn read(&self, name: &str) -> Result<String, ReadError>;

    /// Short label for logging and diagnostics.
    fn describe(&self) -> &str;
}

/// A candidate storage location, tried in a fixed priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// Read-only bundled assets shipped with the application.
    Bundle(PathBuf),
    /// The name taken as a path relative to the working directory.
    Direct,
    /// The user's writable documents area.
    Documents(PathBuf),
}

impl ResourceLocation {
    /// The concrete path this location yields for a given name.
    pub fn candidate(&self, name: &str) -> PathBuf {
        match self {
            Self::Bundle(dir) => dir.join(name),
            Self::Direct => PathBuf::from(name),
            Self::Documents(dir) => dir.join(name),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bundle(_) => "bundle",
            Self::Direct => "direct",
            Self::Documents(_) => "documents",
        }
    }
}

/// True when the identifier names an exact filesystem position rather than
/// a resource to resolve.
pub(crate) fn is_absolute(name: &str) -> bool {
    Path::new(name).is_absolute()
}
