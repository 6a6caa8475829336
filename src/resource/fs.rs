use std::path::PathBuf;

use async_trait::async_trait;
use directories::UserDirs;
use log::debug;
use tokio::fs;

use super::{is_absolute, ResourceLocation, ResourceReader};
use crate::error::ReadError;

/// Platform handle for the filesystem reader: where bundled assets live
/// and where the writable documents area is.
#[derive(Debug, Clone, Default)]
pub struct ResourceContext {
    /// Directory holding read-only bundled assets, if the deployment has one.
    pub bundle_dir: Option<PathBuf>,
    /// Writable documents directory. Defaults to the user's documents
    /// folder when left unset.
    pub documents_dir: Option<PathBuf>,
}

impl ResourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = Some(dir.into());
        self
    }

    pub fn with_documents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.documents_dir = Some(dir.into());
        self
    }
}

/// Filesystem-backed [`ResourceReader`].
///
/// Bare names resolve against an ordered candidate list: bundled assets
/// first, then the name as a direct relative path, then the documents
/// area. The first location whose candidate exists wins; a read failure
/// at an existing candidate is terminal and never falls through.
pub struct FsResourceReader {
    locations: Vec<ResourceLocation>,
}

impl FsResourceReader {
    pub fn new(ctx: ResourceContext) -> Self {
        let mut locations = Vec::new();
        if let Some(dir) = ctx.bundle_dir {
            locations.push(ResourceLocation::Bundle(dir));
        }
        locations.push(ResourceLocation::Direct);
        let documents = ctx
            .documents_dir
            .or_else(|| UserDirs::new().and_then(|d| d.document_dir().map(|p| p.to_path_buf())));
        if let Some(dir) = documents {
            locations.push(ResourceLocation::Documents(dir));
        }
        Self { locations }
    }

    /// The candidate locations in the order they are tried.
    pub fn locations(&self) -> &[ResourceLocation] {
        &self.locations
    }

    async fn read_resolved(&self, name: &str) -> Result<String, ReadError> {
        let mut attempted = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            let candidate = location.candidate(name);
            match fs::try_exists(&candidate).await {
                Ok(true) => {
                    debug!("{name}: found at {} location {}", location.label(), candidate.display());
                    return fs::read_to_string(&candidate).await.map_err(|source| {
                        ReadError::Io {
                            path: candidate,
                            source,
                        }
                    });
                }
                Ok(false) => {
                    debug!("{name}: absent at {} location {}", location.label(), candidate.display());
                }
                Err(err) => {
                    // existence could not be confirmed; treat like absence
                    debug!("{name}: cannot probe {}: {err}", candidate.display());
                }
            }
            attempted.push(candidate);
        }
        Err(ReadError::NotFound {
            name: name.to_string(),
            attempted,
        })
    }
}

#[async_trait]
impl ResourceReader for FsResourceReader {
    async fn read(&self, name: &str) -> Result<String, ReadError> {
        if is_absolute(name) {
            let path = PathBuf::from(name);
            debug!("reading absolute path {}", path.display());
            return fs::read_to_string(&path)
                .await
                .map_err(|source| ReadError::Io { path, source });
        }
        self.read_resolved(name).await
    }

    fn describe(&self) -> &str {
        "filesystem"
    }
}
