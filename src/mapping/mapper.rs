use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::{
    foundation::error::{VredError, VredResult},
    foundation::paths::{PathStyle, normalize_path, to_forward_slashes},
    mapping::rules::{PathMappingRule, read_rules_file},
};

#[derive(Debug)]
enum RuleSet {
    Loaded(Vec<PathMappingRule>),
    Failed(String),
}

/// Rewrites file paths with an ordered list of prefix rules.
///
/// Rules come either from memory or from a rules file that is read lazily, at most once, on
/// first use. When no rules are available (no file configured, or the file could not be
/// read) [`PathMapper::map_path`] is the identity.
#[derive(Debug)]
pub struct PathMapper {
    rules_file: Option<PathBuf>,
    rules: OnceLock<RuleSet>,
    style: PathStyle,
}

impl PathMapper {
    /// Mapper that reads its rules from `path` on first use.
    pub fn from_rules_file(path: impl Into<PathBuf>) -> Self {
        Self {
            rules_file: Some(path.into()),
            rules: OnceLock::new(),
            style: PathStyle::host(),
        }
    }

    /// Mapper over an in-memory rule list.
    pub fn with_rules(rules: Vec<PathMappingRule>) -> Self {
        Self {
            rules_file: None,
            rules: OnceLock::from(RuleSet::Loaded(rules)),
            style: PathStyle::host(),
        }
    }

    /// Mapper with no rules; every path maps to itself.
    pub fn identity() -> Self {
        Self::with_rules(Vec::new())
    }

    /// Override the separator conventions used for normalization (defaults to the host's).
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    /// Separator conventions used by this mapper.
    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Configured rules file, if any.
    pub fn rules_file(&self) -> Option<&Path> {
        self.rules_file.as_deref()
    }

    /// Load the rule list if that has not been attempted yet.
    ///
    /// A failed load is remembered: the rule set stays empty and later calls report the same
    /// failure without touching the filesystem again.
    pub fn load_rules(&self) -> VredResult<&[PathMappingRule]> {
        match self.rules.get_or_init(|| self.read_rules()) {
            RuleSet::Loaded(rules) => Ok(rules),
            RuleSet::Failed(msg) => Err(VredError::path_mapping(msg.clone())),
        }
    }

    /// Current rule list, triggering the implicit load. Empty when loading failed.
    pub fn rules(&self) -> &[PathMappingRule] {
        self.load_rules().unwrap_or(&[])
    }

    /// Rewrite `path` with the first matching rule.
    ///
    /// Returns the input unchanged when it is empty, when there are no rules, or when no rule
    /// matches. Otherwise the matched source prefix is replaced by the rule's destination and
    /// the result is normalized for this mapper's [`PathStyle`].
    pub fn map_path(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        let rules = self.rules();
        if rules.is_empty() {
            return path.to_string();
        }
        match apply_rules(path, rules, self.style) {
            Some(mapped) => {
                tracing::debug!(from = path, to = mapped.as_str(), "mapped path");
                mapped
            }
            None => path.to_string(),
        }
    }

    fn read_rules(&self) -> RuleSet {
        let Some(path) = &self.rules_file else {
            return RuleSet::Failed("no path mapping rules file configured".to_string());
        };
        match read_rules_file(path) {
            Ok(rules) => {
                tracing::info!(
                    count = rules.len(),
                    file = %path.display(),
                    "loaded path mapping rules"
                );
                RuleSet::Loaded(rules)
            }
            Err(e) => {
                tracing::error!("{e:#}");
                RuleSet::Failed(format!("{e:#}"))
            }
        }
    }
}

/// Apply the first rule (in list order) whose source prefix matches `path`.
///
/// Returns `None` when no rule matches. Windows-format rules match case-insensitively,
/// POSIX-format rules case-sensitively; both sides are compared with forward slashes after
/// normalization for `style`.
pub fn apply_rules(path: &str, rules: &[PathMappingRule], style: PathStyle) -> Option<String> {
    let in_path = to_forward_slashes(&normalize_path(path, style));
    for rule in rules {
        let source = to_forward_slashes(&normalize_path(&rule.source_path, style));
        let Some(matched) = match_prefix(
            &in_path,
            &source,
            rule.source_path_format.case_insensitive(),
        ) else {
            continue;
        };

        let remainder = in_path[matched..].trim_start_matches('/');
        let destination = if rule.destination_path.is_empty() {
            String::new()
        } else {
            normalize_path(&rule.destination_path, style)
        };
        let joined = format!("{destination}{}{remainder}", style.separator());
        let joined = match style {
            PathStyle::Posix => to_forward_slashes(&joined),
            PathStyle::Windows => joined,
        };
        return Some(normalize_path(&joined, style));
    }
    None
}

/// Byte length of the `prefix` match at the start of `haystack`, if it matches.
fn match_prefix(haystack: &str, prefix: &str, case_insensitive: bool) -> Option<usize> {
    if !case_insensitive {
        return haystack.starts_with(prefix).then_some(prefix.len());
    }
    let mut hay = haystack.char_indices();
    for pc in prefix.chars() {
        let (_, hc) = hay.next()?;
        if !hc.to_lowercase().eq(pc.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}

#[cfg(test)]
#[path = "../../tests/unit/mapping/mapper.rs"]
mod tests;
