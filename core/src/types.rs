//! Schema type definitions for flag and argument declarations.
//!
//! This module defines the data model a command declares and the resolver
//! consumes. Declarative fields serialize with [`serde`], so a schema can be
//! stored as JSON or YAML. Transforms are code and are skipped.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::transform::{FlagTransform, FlagValue, Transform, TransformError};

/// Reference to the command that owns a schema.
///
/// Passed through to every transform invocation so a transform can tailor
/// its behavior or diagnostics to the command being run.
///
/// # Examples
///
/// ```
/// use argspec_core::CommandRef;
///
/// let cmd = CommandRef::new("apps").with_command("create");
/// assert_eq!(cmd.id(), "apps:create");
/// assert_eq!(CommandRef::new("login").id(), "login");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRef {
    /// Topic the command lives under (e.g., "apps").
    pub topic: String,
    /// Command within the topic, if any (e.g., "create").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandRef {
    /// Creates a reference to a bare topic command.
    pub fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            ..Default::default()
        }
    }

    /// Sets the command within the topic.
    pub fn with_command(mut self, command: &str) -> Self {
        self.command = Some(command.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns `topic:command`, or just `topic` when there is no command.
    pub fn id(&self) -> String {
        match &self.command {
            Some(command) => format!("{}:{command}", self.topic),
            None => self.topic.clone(),
        }
    }
}

/// Declaration of one named flag.
///
/// A flag is always addressable in long form (`--name`) and optionally in
/// short form (`-c`). A flag consumes a value if it is declared with
/// [`with_value`](FlagSpec::with_value) or carries a transform.
///
/// # Examples
///
/// ```
/// use argspec_core::FlagSpec;
///
/// let force = FlagSpec::boolean("force").with_char('f');
/// assert!(!force.consumes_value());
///
/// let remote = FlagSpec::with_value("remote").with_char('r').required();
/// assert!(remote.consumes_value());
/// assert!(remote.is_required());
///
/// // `optional: false` is another way of saying required
/// let app = FlagSpec::with_value("app").optional(false);
/// assert!(app.is_required());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Canonical long-form name, without the leading `--`.
    pub name: String,
    /// Single-character alias used in short form.
    #[serde(default, alias = "char", skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Whether the flag consumes a following value.
    #[serde(default)]
    pub has_value: bool,
    /// Whether the flag must be given.
    #[serde(default)]
    pub required: bool,
    /// Explicit optionality; `Some(false)` makes the flag required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Description for help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hidden flags still resolve but are left out of help output.
    #[serde(default)]
    pub hidden: bool,
    /// Value transform invoked after all tokens are classified.
    #[serde(skip)]
    pub transform: Option<Transform>,
}

impl FlagSpec {
    /// Creates a boolean flag (no value).
    pub fn boolean(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Creates a flag that consumes a value.
    pub fn with_value(name: &str) -> Self {
        Self {
            name: name.to_string(),
            has_value: true,
            ..Default::default()
        }
    }

    /// Sets the short-form alias.
    pub fn with_char(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Marks the flag as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets explicit optionality.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    /// Hides the flag from help output.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Attaches a prepared transform. The flag now consumes a value.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Attaches an async closure as the transform.
    ///
    /// # Examples
    ///
    /// ```
    /// use argspec_core::{FlagSpec, FlagValue};
    ///
    /// let port = FlagSpec::boolean("port").parse_with(|raw, _, _| async move {
    ///     Ok(raw.map(FlagValue::String).unwrap_or(FlagValue::Null))
    /// });
    /// assert!(port.consumes_value());
    /// ```
    pub fn parse_with<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Option<String>, Option<Arc<CommandRef>>, String) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<FlagValue, TransformError>> + Send + 'static,
    {
        self.with_transform(Transform::from_fn(f))
    }

    /// Attaches any [`FlagTransform`] implementation.
    pub fn transform_with(self, transform: impl FlagTransform + 'static) -> Self {
        self.with_transform(Transform::new(transform))
    }

    /// Returns `true` if the flag takes a value, either declared or implied by
    /// a transform.
    pub fn consumes_value(&self) -> bool {
        self.has_value || self.transform.is_some()
    }

    /// Returns `true` if `required` is set or `optional` is explicitly false.
    pub fn is_required(&self) -> bool {
        self.required || self.optional == Some(false)
    }
}

/// Declaration of one positional slot.
///
/// Slots are filled in declaration order. A slot is required unless it says
/// otherwise through `required: false` or `optional: true`.
///
/// # Examples
///
/// ```
/// use argspec_core::ArgSpec;
///
/// assert!(ArgSpec::required("app").is_required());
/// assert!(!ArgSpec::optional("dyno").is_required());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSpec {
    /// Key used in the resolved arguments map.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Description for help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgSpec {
    /// Creates a required slot.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Creates an optional slot.
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: Some(true),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required != Some(false) && self.optional != Some(true)
    }
}

/// Complete declaration consumed by the resolver.
///
/// Flags keep their declaration order, which is also the order transforms run
/// in. The schema is never modified by a parse.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgSpec, FlagSpec, Schema};
///
/// let schema = Schema::new()
///     .with_flag(FlagSpec::boolean("force").with_char('f'))
///     .with_flag(FlagSpec::with_value("remote").with_char('r'))
///     .with_arg(ArgSpec::required("app"))
///     .with_arg(ArgSpec::optional("dyno"));
///
/// assert_eq!(schema.find_short('r').unwrap().name, "remote");
/// assert!(schema.find_long("force").is_some());
/// assert_eq!((schema.min_args(), schema.max_args()), (1, 2));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Flag declarations in schema order.
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
    /// Positional slots in declaration order.
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Allow positional tokens beyond the declared slots.
    #[serde(default)]
    pub variable_args: bool,
    /// Command handed to transforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Arc<CommandRef>>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    /// Adds a positional slot.
    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Sets whether extra positional tokens are accepted.
    pub fn variable_args(mut self, variable: bool) -> Self {
        self.variable_args = variable;
        self
    }

    /// Sets the owning command.
    pub fn with_command(mut self, command: CommandRef) -> Self {
        self.command = Some(Arc::new(command));
        self
    }

    /// Index of the first flag declared with this long name.
    pub fn position_long(&self, name: &str) -> Option<usize> {
        self.flags.iter().position(|f| f.name == name)
    }

    /// Index of the first flag declared with this short alias.
    pub fn position_short(&self, short: char) -> Option<usize> {
        self.flags.iter().position(|f| f.short == Some(short))
    }

    /// Finds a flag by its long name.
    pub fn find_long(&self, name: &str) -> Option<&FlagSpec> {
        self.position_long(name).map(|i| &self.flags[i])
    }

    /// Finds a flag by short alias. The first declaration wins.
    pub fn find_short(&self, short: char) -> Option<&FlagSpec> {
        self.position_short(short).map(|i| &self.flags[i])
    }

    /// Number of required positional slots.
    pub fn min_args(&self) -> usize {
        self.args.iter().filter(|a| a.is_required()).count()
    }

    /// Total number of positional slots.
    pub fn max_args(&self) -> usize {
        self.args.len()
    }
}
