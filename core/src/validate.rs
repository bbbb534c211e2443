//! Schema validation.
//!
//! The resolver accepts any schema and resolves ambiguities by declaration
//! order. These checks catch declarations that would make some tokens
//! unreachable or produce confusing arity errors, so schema authors can fix
//! them up front.
//!
//! # Examples
//!
//! ```
//! use argspec_core::*;
//!
//! let schema = Schema::new().with_flag(FlagSpec::boolean("verbose").with_char('v'));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: two flags share the same short alias
//! let bad = Schema::new()
//!     .with_flag(FlagSpec::boolean("verbose").with_char('v'))
//!     .with_flag(FlagSpec::boolean("version").with_char('v'));
//! assert_eq!(validate_schema(&bad), vec![SchemaError::DuplicateShortFlag('v')]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ArgSpec, FlagSpec, Schema};

/// Schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Flag name is empty or whitespace-only.
    #[error("flag name cannot be empty")]
    EmptyFlagName,
    /// Flag name starts with `-` or contains `=`, so `--name` can never match.
    #[error("invalid flag name: {0}")]
    InvalidFlagName(String),
    /// Two flags share the same name.
    #[error("duplicate flag: --{0}")]
    DuplicateFlag(String),
    /// Short alias of `-` or `=` cannot be typed as `-c`.
    #[error("invalid short flag: -{0}")]
    InvalidShortFlag(char),
    /// Two flags share the same short alias; only the first is reachable.
    #[error("duplicate short flag: -{0}")]
    DuplicateShortFlag(char),
    /// Argument name is empty or whitespace-only.
    #[error("argument name cannot be empty")]
    EmptyArgName,
    /// Two positional slots share the same name.
    #[error("duplicate argument: {0}")]
    DuplicateArg(String),
    /// A required slot follows an optional one.
    #[error("required argument {0} follows an optional argument")]
    RequiredAfterOptional(String),
}

/// Validates a schema.
///
/// Returns the first problem found, or an empty list when the schema is
/// sound.
///
/// # Examples
///
/// ```
/// use argspec_core::*;
///
/// // Optional slot before a required one miscounts missing arguments
/// let schema = Schema::new()
///     .with_arg(ArgSpec::optional("dyno"))
///     .with_arg(ArgSpec::required("app"));
/// let errors = validate_schema(&schema);
/// assert!(matches!(errors[0], SchemaError::RequiredAfterOptional(_)));
/// ```
pub fn validate_schema(schema: &Schema) -> Vec<SchemaError> {
    let mut errors = validate_flags(&schema.flags);
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_args(&schema.args));
    errors
}

fn validate_flags(flags: &[FlagSpec]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();
    let mut seen_shorts = HashSet::new();

    for flag in flags {
        let name = flag.name.trim();
        if name.is_empty() {
            errors.push(SchemaError::EmptyFlagName);
            return errors;
        }
        if name.starts_with('-') || name.contains('=') || name != flag.name {
            errors.push(SchemaError::InvalidFlagName(flag.name.clone()));
            return errors;
        }
        if !seen_names.insert(name) {
            errors.push(SchemaError::DuplicateFlag(name.to_string()));
            return errors;
        }

        if let Some(short) = flag.short {
            if short == '-' || short == '=' || short.is_whitespace() {
                errors.push(SchemaError::InvalidShortFlag(short));
                return errors;
            }
            if !seen_shorts.insert(short) {
                errors.push(SchemaError::DuplicateShortFlag(short));
                return errors;
            }
        }
    }

    errors
}

fn validate_args(args: &[ArgSpec]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut optional_seen = false;

    for arg in args {
        let name = arg.name.trim();
        if name.is_empty() {
            errors.push(SchemaError::EmptyArgName);
            return errors;
        }
        if !seen.insert(name) {
            errors.push(SchemaError::DuplicateArg(name.to_string()));
            return errors;
        }

        if !arg.is_required() {
            optional_seen = true;
        } else if optional_seen {
            errors.push(SchemaError::RequiredAfterOptional(name.to_string()));
            return errors;
        }
    }

    errors
}
