//! Schema documents: a command's flag and argument declarations on disk.
//!
//! Documents are YAML or JSON, picked by file extension (`.json` is JSON,
//! anything else is YAML). Transforms are code, so a document can only name
//! one of the stock transforms.
//!
//! # Example YAML
//!
//! ```yaml
//! topic: apps
//! command: create
//! description: Create a new app
//! flags:
//!   - name: region
//!     char: r
//!     has_value: true
//!     transform: { kind: choice, options: [us, eu] }
//!   - name: size
//!     transform: { kind: integer }
//!   - name: json
//!     char: j
//! args:
//!   - name: app
//!     optional: true
//! ```

use std::io::BufReader;
use std::path::Path;

use argspec_core::{ArgSpec, CommandRef, FlagSpec, Schema, Transform};
use argspec_resolver::builtin;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a schema document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Stock transform named in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransformDecl {
    Identity,
    Integer,
    Choice { options: Vec<String> },
    Default { value: String },
    Env { var: String },
}

impl TransformDecl {
    fn build(&self) -> Transform {
        match self {
            Self::Identity => builtin::identity(),
            Self::Integer => builtin::integer(),
            Self::Choice { options } => {
                let options: Vec<&str> = options.iter().map(String::as_str).collect();
                builtin::choice(&options)
            }
            Self::Default { value } => builtin::default_value(value.as_str()),
            Self::Env { var } => builtin::env_default(var.as_str()),
        }
    }
}

/// One flag as written in a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagDecl {
    pub name: String,
    #[serde(default, rename = "char", skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(default)]
    pub has_value: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformDecl>,
}

impl FlagDecl {
    fn to_spec(&self) -> FlagSpec {
        FlagSpec {
            name: self.name.clone(),
            short: self.short,
            has_value: self.has_value,
            required: self.required,
            optional: self.optional,
            description: self.description.clone(),
            hidden: self.hidden,
            transform: self.transform.as_ref().map(TransformDecl::build),
        }
    }
}

/// A command's declaration as loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form help appended after the flag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Replaces the generated usage line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default)]
    pub variable_args: bool,
    #[serde(default)]
    pub flags: Vec<FlagDecl>,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
}

impl SchemaDocument {
    /// Loads a document, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DocumentError::IoError) if the file cannot be
    /// read, or a JSON/YAML error if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(document)
    }

    pub fn command_ref(&self) -> CommandRef {
        CommandRef {
            topic: self.topic.clone(),
            command: self.command.clone(),
            description: self.description.clone(),
        }
    }

    /// Builds the schema the resolver consumes.
    pub fn to_schema(&self) -> Schema {
        Schema {
            flags: self.flags.iter().map(FlagDecl::to_spec).collect(),
            args: self.args.clone(),
            variable_args: self.variable_args,
            command: None,
        }
        .with_command(self.command_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
topic: apps
command: create
description: Create a new app
flags:
  - name: region
    char: r
    has_value: true
    transform: { kind: choice, options: [us, eu] }
  - name: size
    transform: { kind: integer }
  - name: json
    char: j
    hidden: true
args:
  - name: app
    optional: true
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let doc: SchemaDocument = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(doc.topic, "apps");
        assert_eq!(doc.command.as_deref(), Some("create"));
        assert_eq!(doc.flags.len(), 3);
        assert_eq!(doc.flags[0].short, Some('r'));
        assert_eq!(
            doc.flags[0].transform,
            Some(TransformDecl::Choice {
                options: vec!["us".into(), "eu".into()]
            })
        );
        assert!(doc.flags[2].hidden);
        assert!(!doc.args[0].is_required());
    }

    #[test]
    fn test_to_schema_attaches_transforms() {
        let doc: SchemaDocument = serde_yaml::from_str(sample_yaml()).unwrap();
        let schema = doc.to_schema();

        assert!(schema.find_long("size").unwrap().consumes_value());
        assert!(!schema.find_short('j').unwrap().consumes_value());
        assert_eq!(schema.command.as_ref().unwrap().id(), "apps:create");
    }

    #[test]
    fn test_deserialize_minimal_json() {
        let doc: SchemaDocument = serde_json::from_str(r#"{"topic": "login"}"#).unwrap();
        assert!(doc.flags.is_empty());
        assert!(doc.args.is_empty());
        assert!(!doc.variable_args);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("apps.yml");
        let json_path = dir.path().join("apps.json");
        std::fs::write(&yaml_path, sample_yaml()).unwrap();
        std::fs::write(&json_path, r#"{"topic": "apps", "variable_args": true}"#).unwrap();

        assert_eq!(SchemaDocument::load(&yaml_path).unwrap().flags.len(), 3);
        assert!(SchemaDocument::load(&json_path).unwrap().variable_args);
        assert!(matches!(
            SchemaDocument::load(dir.path().join("missing.yml")),
            Err(DocumentError::IoError(_))
        ));
    }
}
