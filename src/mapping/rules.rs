use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::error::{VredError, VredResult};

/// Name of the rule list inside a path-mapping rules document.
pub const PATH_MAPPING_RULES_FIELD: &str = "path_mapping_rules";

/// Path syntax a rule's source path was captured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathFormat {
    /// Windows paths; matching is case-insensitive.
    Windows,
    /// POSIX paths; matching is case-sensitive.
    Posix,
}

impl PathFormat {
    /// Whether prefix comparison ignores case for this format.
    pub fn case_insensitive(self) -> bool {
        matches!(self, Self::Windows)
    }
}

/// One prefix-rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PathMappingRule {
    /// The path format associated with the source path.
    pub source_path_format: PathFormat,
    /// Prefix to match against input paths.
    pub source_path: String,
    /// Replacement prefix.
    pub destination_path: String,
}

impl PathMappingRule {
    /// Convenience constructor.
    pub fn new(
        source_path_format: PathFormat,
        source_path: impl Into<String>,
        destination_path: impl Into<String>,
    ) -> Self {
        Self {
            source_path_format,
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }
}

#[derive(serde::Deserialize)]
struct RulesDocument {
    path_mapping_rules: Vec<PathMappingRule>,
}

/// Parse a rules document (`{"path_mapping_rules": [...]}`) from JSON text.
///
/// Other top-level keys (e.g. a `version` tag) are ignored; rule order is preserved.
pub fn parse_rules(json: &str) -> VredResult<Vec<PathMappingRule>> {
    let doc: RulesDocument = serde_json::from_str(json).map_err(|e| {
        VredError::path_mapping(format!(
            "malformed rules document (expected a '{PATH_MAPPING_RULES_FIELD}' list): {e}"
        ))
    })?;
    Ok(doc.path_mapping_rules)
}

/// Read and parse a rules file.
pub fn read_rules_file(path: &Path) -> VredResult<Vec<PathMappingRule>> {
    let f = File::open(path)
        .with_context(|| format!("open path mapping rules '{}'", path.display()))?;
    let doc: RulesDocument = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
        VredError::path_mapping(format!(
            "malformed rules file '{}': {e}",
            path.display()
        ))
    })?;
    Ok(doc.path_mapping_rules)
}

#[cfg(test)]
#[path = "../../tests/unit/mapping/rules.rs"]
mod tests;
