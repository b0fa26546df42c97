//! Engine configuration.
//!
//! Copyright (c) 2025 stylepack contributors
//!
//! The configuration is an immutable value handed to [`crate::Engine::new`].
//! It can be built in code or loaded from YAML:
//!
//! ```yaml
//! dialect: less
//! partial_prefix: _
//! template_suffix: erb
//! search_paths:
//!   - app/assets/stylesheets
//!   - vendor/assets/stylesheets
//! cache: true
//! cache_version: "1"
//! options:
//!   compress: false
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::lookup::MimeTable;
use crate::options::CompileOptions;
use crate::types::ContentType;

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Dialect extension without the dot (`less`)
    pub dialect: String,

    /// Prefix marking partial files (`_`)
    pub partial_prefix: String,

    /// Suffix of host-templated assets (`erb`)
    pub template_suffix: String,

    /// Root directory of the asset tree. Defaults to the first search path.
    pub root: Option<PathBuf>,

    /// Ordered search paths; used by hosts built from this config
    pub search_paths: Vec<PathBuf>,

    /// Bumped to invalidate every cache entry written by older settings
    pub cache_version: String,

    /// Whether compiled output is cached at all
    pub cache: bool,

    /// Default compile options, overlaid by per-request options
    pub options: CompileOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialect: "less".to_string(),
            partial_prefix: "_".to_string(),
            template_suffix: "erb".to_string(),
            root: None,
            search_paths: Vec::new(),
            cache_version: "1".to_string(),
            cache: true,
            options: CompileOptions::new(),
        }
    }
}

impl EngineConfig {
    /// Configuration for another dialect, everything else defaulted.
    pub fn for_dialect(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            ..Self::default()
        }
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| EngineError::Config {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            file: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            EngineError::Config { message, .. } => EngineError::Config {
                file: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Check field invariants.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(EngineError::Config {
                file: None,
                message: message.to_string(),
            })
        };
        if self.dialect.is_empty() || self.dialect.contains('.') {
            return invalid("dialect must be a bare extension such as `less`");
        }
        if self.partial_prefix.is_empty() || self.partial_prefix.contains('/') {
            return invalid("partial_prefix must be a non-empty file name prefix");
        }
        if self.template_suffix.contains('.') {
            return invalid("template_suffix must be a bare extension such as `erb`");
        }
        Ok(())
    }

    /// Extensions appended to import paths, highest priority first.
    pub fn import_extensions(&self) -> Vec<String> {
        let dialect = &self.dialect;
        let mut extensions = vec![
            format!(".{dialect}"),
            ".css".to_string(),
            format!(".css.{dialect}"),
        ];
        if !self.template_suffix.is_empty() {
            let suffix = &self.template_suffix;
            extensions.push(format!(".{dialect}.{suffix}"));
            extensions.push(format!(".css.{dialect}.{suffix}"));
        }
        extensions
    }

    /// Content types by file-name suffix.
    pub fn mime_table(&self) -> MimeTable {
        let mut table = MimeTable::new();
        table.register(".css", ContentType::Css);
        for extension in self.import_extensions() {
            if extension != ".css" {
                table.register(&extension, ContentType::Stylesheet);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.dialect, "less");
        assert_eq!(config.partial_prefix, "_");
        assert!(config.cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_import_extensions_order() {
        assert_eq!(
            EngineConfig::default().import_extensions(),
            vec![".less", ".css", ".css.less", ".less.erb", ".css.less.erb"]
        );

        let config = EngineConfig {
            template_suffix: String::new(),
            ..EngineConfig::for_dialect("scss")
        };
        assert_eq!(config.import_extensions(), vec![".scss", ".css", ".css.scss"]);
    }

    #[test]
    fn test_from_yaml() {
        let config = EngineConfig::from_yaml_str(
            "dialect: less\nsearch_paths:\n  - app/assets/stylesheets\ncache: false\noptions:\n  compress: true\n",
        )
        .unwrap();

        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("app/assets/stylesheets")]
        );
        assert!(!config.cache);
        assert_eq!(
            config.options.get("compress"),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(config.partial_prefix, "_");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let err = EngineConfig::from_yaml_str("dialekt: less\n").unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_dotted_dialect() {
        let config = EngineConfig::for_dialect(".less");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stylepack.yml");
        std::fs::write(&path, "dialect: ''\n").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("stylepack.yml"));
    }
}
