//! Command archives: TOML documents carrying resources and script-backed
//! command types.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{BootstrapError, Result};
use crate::shell::{Command, CommandType, ScriptCommand};

/// File-name suffix identifying an archive.
pub const ARCHIVE_SUFFIX: &str = ".cmdpack";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArchiveFile {
    #[serde(default)]
    resources: BTreeMap<String, String>,
    #[serde(default)]
    commands: BTreeMap<String, ScriptDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptDef {
    scope: String,
    name: String,
    #[serde(default)]
    description: String,
    script: String,
}

/// A parsed archive.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    contents: ArchiveFile,
}

impl Archive {
    /// Read and parse the archive at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BootstrapError::ArchiveRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Parse archive text; `path` is only used for identification.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let contents: ArchiveFile =
            toml::from_str(text).map_err(|source| BootstrapError::ArchiveParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resource(&self, name: &str) -> Option<&str> {
        self.contents.resources.get(name).map(String::as_str)
    }

    /// Command type declared under `class_name`, if any.
    pub fn resolve(&self, class_name: &str) -> Option<CommandType> {
        let def = self.contents.commands.get(class_name)?;
        let script = def.script.clone();
        Some(CommandType::new(
            class_name,
            def.scope.clone(),
            def.name.clone(),
            def.description.clone(),
            move || Arc::new(ScriptCommand::new(script.clone())) as Arc<dyn Command>,
        ))
    }
}
