//! Core schema types for command-line flag and argument resolution.
//!
//! This crate defines what a command declares about its input:
//!
//! - [`FlagSpec`] — a named flag with an optional short alias, value
//!   requirement, requiredness, and an optional value [`Transform`].
//! - [`ArgSpec`] — a positional slot, required or optional.
//! - [`Schema`] — ordered flags and slots plus the variable-args switch.
//! - [`CommandRef`] — the owning command, handed to transforms.
//!
//! Validation ([`validate_schema`]) catches declarations the resolver would
//! silently tolerate, such as duplicate short aliases.
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let schema = Schema::new()
//!     .with_command(CommandRef::new("git").with_command("push"))
//!     .with_flag(FlagSpec::boolean("force").with_char('f'))
//!     .with_flag(FlagSpec::with_value("remote").with_char('r'))
//!     .with_arg(ArgSpec::optional("branch"));
//!
//! assert_eq!(schema.command.as_ref().unwrap().id(), "git:push");
//! assert!(validate_schema(&schema).is_empty());
//! ```

mod transform;
mod types;
mod validate;

pub use transform::{
    FlagTransform, FlagValue, Transform, TransformError, TransformFuture, transform_error,
};
pub use types::*;
pub use validate::{SchemaError, validate_schema};
