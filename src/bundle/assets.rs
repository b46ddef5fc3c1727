use std::{collections::BTreeSet, fs, path::Path};

use anyhow::Context;

use crate::foundation::{
    error::{VredError, VredResult},
    paths::{PathStyle, normalize_path},
};

/// File name of the asset references artifact inside a job bundle.
pub const ASSET_REFERENCES_FILENAME: &str = "asset_references.yaml";

/// Files and directories a job reads and writes, as shipped to the farm's job attachments.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "AssetReferencesDocument", into = "AssetReferencesDocument")]
pub struct AssetReferences {
    /// Input files (scene, render script, referenced assets).
    pub input_filenames: BTreeSet<String>,
    /// Input directories uploaded whole.
    pub input_directories: BTreeSet<String>,
    /// Directories the job writes output into.
    pub output_directories: BTreeSet<String>,
}

impl AssetReferences {
    /// Record an input file, normalized for `style`.
    pub fn add_input_file(&mut self, path: &str, style: PathStyle) {
        self.input_filenames.insert(normalize_path(path, style));
    }

    /// Record an input directory.
    pub fn add_input_directory(&mut self, path: impl Into<String>) {
        self.input_directories.insert(path.into());
    }

    /// Record an output directory.
    pub fn add_output_directory(&mut self, path: impl Into<String>) {
        self.output_directories.insert(path.into());
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.input_filenames.is_empty()
            && self.input_directories.is_empty()
            && self.output_directories.is_empty()
    }

    /// Render as the bundle YAML document.
    pub fn to_yaml(&self) -> VredResult<String> {
        serde_yaml::to_string(self).map_err(|e| VredError::serde(e.to_string()))
    }

    /// Parse a bundle YAML document.
    pub fn from_yaml(yaml: &str) -> VredResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| VredError::serde(format!("invalid asset references document: {e}")))
    }

    /// Read an `asset_references.yaml` file.
    pub fn read(path: &Path) -> VredResult<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read asset references '{}'", path.display()))?;
        Self::from_yaml(&text)
    }
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetReferencesDocument {
    #[serde(default)]
    asset_references: AssetSections,
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
struct AssetSections {
    #[serde(default)]
    inputs: InputSection,
    #[serde(default)]
    outputs: OutputSection,
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
struct InputSection {
    #[serde(default)]
    filenames: BTreeSet<String>,
    #[serde(default)]
    directories: BTreeSet<String>,
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
struct OutputSection {
    #[serde(default)]
    directories: BTreeSet<String>,
}

impl From<AssetReferencesDocument> for AssetReferences {
    fn from(doc: AssetReferencesDocument) -> Self {
        let s = doc.asset_references;
        Self {
            input_filenames: s.inputs.filenames,
            input_directories: s.inputs.directories,
            output_directories: s.outputs.directories,
        }
    }
}

impl From<AssetReferences> for AssetReferencesDocument {
    fn from(refs: AssetReferences) -> Self {
        Self {
            asset_references: AssetSections {
                inputs: InputSection {
                    filenames: refs.input_filenames,
                    directories: refs.input_directories,
                },
                outputs: OutputSection {
                    directories: refs.output_directories,
                },
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bundle/assets.rs"]
mod tests;
