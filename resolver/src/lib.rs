//! Resolves raw command-line tokens against a declared [`Schema`].
//!
//! Given a command's flags and positional slots and the tokens a user typed,
//! the resolver sorts the tokens into flag values and positional arguments,
//! enforces arity and requiredness, and runs each flag's value transform.
//!
//! Supported token shapes:
//!
//! - `--name value` and `--name=value` for value-bearing flags;
//! - `-c value`, `-cvalue` and `-c=value` for short aliases;
//! - `-abc` for clusters of boolean short flags, resolved as `-a -b -c`;
//! - `--` to end flag parsing; everything after it is positional.
//!
//! Tokens that look like flags but match nothing are kept as positional.
//!
//! # Example
//!
//! ```
//! use argspec_core::{ArgSpec, FlagSpec, Schema};
//! use argspec_resolver::{ParseError, parse};
//!
//! let schema = Schema::new()
//!     .with_flag(FlagSpec::boolean("all").with_char('a'))
//!     .with_flag(FlagSpec::boolean("verbose").with_char('v'))
//!     .with_arg(ArgSpec::required("app"));
//!
//! let output = futures::executor::block_on(parse(&schema, ["-av", "myapp"])).unwrap();
//! assert!(output.is_set("all") && output.is_set("verbose"));
//! assert_eq!(output.argv, vec!["myapp"]);
//!
//! let err = futures::executor::block_on(parse(&schema, ["myapp", "extra"])).unwrap_err();
//! assert!(matches!(err, ParseError::UnexpectedArgument(_)));
//! ```
//!
//! [`Schema`]: argspec_core::Schema

pub mod builtin;
mod error;
mod queue;
mod resolve;
mod token;

pub use error::{ErrorKind, ParseError, Result};
pub use queue::TokenQueue;
pub use resolve::{ResolvedOutput, Resolver, parse};
pub use token::{FlagForm, FlagMatch, FlagShape, classify};
