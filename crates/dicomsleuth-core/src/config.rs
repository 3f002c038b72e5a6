/// Scan configuration: the declarative tag schema plus traversal and
/// worker settings, loadable from JSON.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// {
///   "sentinel": "-",
///   "workers": 8,
///   "fields": [
///     { "name": "PatientID" },
///     { "name": "KVP", "kind": "decimal" }
///   ]
/// }
/// ```
use crate::error::{ConfigError, SchemaError};
use crate::model::schema::default_field_specs;
use crate::model::{FieldSpec, TagSchema, DEFAULT_SENTINEL};
use crate::scanner::EnumerateOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Placeholder for fields a file does not carry.
    pub sentinel: String,
    /// Worker threads; `None` means one per logical CPU.
    pub workers: Option<usize>,
    pub skip_hidden: bool,
    pub follow_links: bool,
    /// Fields to extract, in output order.
    pub fields: Vec<FieldSpec>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            workers: None,
            skip_hidden: false,
            follow_links: false,
            fields: default_field_specs(),
        }
    }
}

impl ScanConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Resolve the field list into a validated schema.
    pub fn schema(&self) -> Result<TagSchema, SchemaError> {
        TagSchema::resolve(&self.fields, &self.sentinel)
    }

    /// Configured worker count, falling back to the logical CPU count. Never 0.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) if n > 0 => n,
            _ => num_cpus::get().max(1),
        }
    }

    pub fn enumerate_options(&self) -> EnumerateOptions {
        EnumerateOptions {
            skip_hidden: self.skip_hidden,
            follow_links: self.follow_links,
            threads: self.worker_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;

    #[test]
    fn test_empty_object_is_default() {
        let config = ScanConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.schema().unwrap(), TagSchema::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ScanConfig::from_json_str(
            r#"{ "sentinel": "-", "fields": [ { "name": "PatientID" }, { "name": "KVP", "kind": "decimal" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.sentinel, "-");
        assert!(!config.skip_hidden);
        let schema = config.schema().unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields()[0].kind, FieldKind::Text);
        assert_eq!(schema.fields()[1].kind, FieldKind::Decimal);
        assert_eq!(schema.sentinel(), "-");
    }

    #[test]
    fn test_round_trip() {
        let config = ScanConfig {
            workers: Some(3),
            skip_hidden: true,
            ..ScanConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ScanConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            ScanConfig::from_json_str(r#"{ "sentinal": "-" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_worker_count_never_zero() {
        let config = ScanConfig {
            workers: Some(0),
            ..ScanConfig::default()
        };
        assert!(config.worker_count() >= 1);
        assert_eq!(
            ScanConfig {
                workers: Some(6),
                ..ScanConfig::default()
            }
            .worker_count(),
            6
        );
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = ScanConfig::load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
