//! Layered loading context: where command types and discovery resources
//! are looked up.
//!
//! The system context holds the compiled-in [`Catalog`]. Passing a classpath
//! root adds a child layer made of every archive found under it; the child is
//! consulted before falling back to its parent.

mod archive;
mod catalog;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::{BootstrapError, Result};
use crate::shell::CommandType;

pub use archive::{Archive, ARCHIVE_SUFFIX};
pub use catalog::Catalog;

/// One resolvable location.
#[derive(Debug, Clone)]
pub enum Location {
    Catalog(Catalog),
    Archive(Archive),
}

impl Location {
    fn resource(&self, name: &str) -> Option<&str> {
        match self {
            Location::Catalog(catalog) => catalog.resource(name),
            Location::Archive(archive) => archive.resource(name),
        }
    }

    fn resolve(&self, class_name: &str) -> Option<CommandType> {
        match self {
            Location::Catalog(catalog) => catalog.resolve(class_name),
            Location::Archive(archive) => archive.resolve(class_name),
        }
    }

    /// Human-readable origin for logging.
    pub fn describe(&self) -> String {
        match self {
            Location::Catalog(_) => "<builtin>".to_string(),
            Location::Archive(archive) => archive.path().display().to_string(),
        }
    }
}

/// A resource found through a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatch {
    /// Location that provided it.
    pub origin: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct LoadingContext {
    locations: Vec<Location>,
    parent: Option<Arc<LoadingContext>>,
}

impl LoadingContext {
    /// Root context over a single catalog.
    pub fn system(catalog: Catalog) -> Self {
        Self {
            locations: vec![Location::Catalog(catalog)],
            parent: None,
        }
    }

    /// Child layer over `parent`.
    pub fn layered(locations: Vec<Location>, parent: Arc<LoadingContext>) -> Self {
        Self {
            locations,
            parent: Some(parent),
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn parent(&self) -> Option<&Arc<LoadingContext>> {
        self.parent.as_ref()
    }

    /// Resolve a class name: own locations in order, then the parent.
    pub fn resolve(&self, class_name: &str) -> Option<CommandType> {
        self.locations
            .iter()
            .find_map(|location| location.resolve(class_name))
            .or_else(|| self.parent.as_ref().and_then(|p| p.resolve(class_name)))
    }

    /// Every copy of `name`: own locations first, then the parent's.
    pub fn resources(&self, name: &str) -> Vec<ResourceMatch> {
        let mut matches: Vec<ResourceMatch> = self
            .locations
            .iter()
            .filter_map(|location| {
                location.resource(name).map(|text| ResourceMatch {
                    origin: location.describe(),
                    text: text.to_string(),
                })
            })
            .collect();
        if let Some(parent) = &self.parent {
            matches.extend(parent.resources(name));
        }
        matches
    }
}

/// Build the context for a run.
///
/// Without a classpath root the system context is returned as is.
pub fn build_loading_context(
    classpath_root: Option<&Path>,
    system: Arc<LoadingContext>,
) -> Result<Arc<LoadingContext>> {
    let Some(root) = classpath_root else {
        return Ok(system);
    };

    let mut paths = Vec::new();
    collect_archives(root, &mut paths)?;
    tracing::debug!(root = %root.display(), archives = paths.len(), "Scanned classpath");

    let locations = paths
        .iter()
        .map(|path| Archive::load(path).map(Location::Archive))
        .collect::<Result<Vec<_>>>()?;

    Ok(Arc::new(LoadingContext::layered(locations, system)))
}

/// Depth-first walk collecting archive files in directory-listing order.
/// Symbolic links to archives and directories are followed.
fn collect_archives(root: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|source| BootstrapError::ClasspathListing {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(BootstrapError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| BootstrapError::ClasspathListing {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        let is_archive = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.ends_with(ARCHIVE_SUFFIX));
        if is_archive {
            out.push(entry.into_path());
        }
    }
    Ok(())
}
