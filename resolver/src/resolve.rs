//! Token resolution against a [`Schema`].
//!
//! A parse runs in three passes:
//!
//! 1. Classification: tokens are consumed from a [`TokenQueue`] and sorted
//!    into flag values and positional tokens. `--` ends flag parsing for the
//!    rest of the input.
//! 2. Arity: the positional count is checked against the declared slots.
//! 3. Transforms: each flag's transform runs in schema order, one at a time,
//!    followed by the flag's required check.
//!
//! Cheap structural checks therefore fail before any transform runs.

use std::collections::BTreeMap;

use argspec_core::{FlagSpec, FlagValue, Schema};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::queue::TokenQueue;
use crate::token::{FlagForm, FlagMatch, FlagShape, classify};

/// Result of a successful parse.
///
/// Holds no reference to the schema it was resolved against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOutput {
    /// Flag values by flag name. Unset flags have no entry.
    pub flags: BTreeMap<String, FlagValue>,
    /// Every positional token, in input order.
    pub argv: Vec<String>,
    /// Positional tokens by slot name, for slots that received one.
    pub args: BTreeMap<String, String>,
}

impl ResolvedOutput {
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    /// Returns the flag's value if it is a string.
    pub fn flag_str(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(FlagValue::as_str)
    }

    /// Returns `true` if the flag has a truthy value.
    pub fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(|v| !is_falsy(v))
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }
}

/// Resolves token lists against one schema.
///
/// A resolver keeps no state between calls; every [`parse`](Resolver::parse)
/// gets its own queue and output.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgSpec, FlagSpec, Schema};
/// use argspec_resolver::Resolver;
///
/// let schema = Schema::new()
///     .with_flag(FlagSpec::boolean("force").with_char('f'))
///     .with_flag(FlagSpec::with_value("remote").with_char('r'))
///     .with_arg(ArgSpec::required("app"));
///
/// let output = futures::executor::block_on(
///     Resolver::new(&schema).parse(["-f", "--remote=origin", "myapp"]),
/// )
/// .unwrap();
///
/// assert!(output.is_set("force"));
/// assert_eq!(output.flag_str("remote"), Some("origin"));
/// assert_eq!(output.arg("app"), Some("myapp"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    schema: &'a Schema,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Resolves `tokens`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered. A transform failure is
    /// returned as [`ParseError::Transform`] and stops the remaining
    /// transforms from running.
    pub async fn parse<I>(&self, tokens: I) -> Result<ResolvedOutput>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut output = self.classify_tokens(TokenQueue::new(tokens))?;
        self.check_arity(&output)?;
        self.transform_flags(&mut output.flags).await?;
        Ok(output)
    }

    fn classify_tokens(&self, mut queue: TokenQueue) -> Result<ResolvedOutput> {
        let mut output = ResolvedOutput::default();
        let mut parsing_flags = true;

        while let Some(token) = queue.pop_front() {
            if parsing_flags && token.starts_with('-') {
                if token == "--" {
                    trace!("end of options");
                    parsing_flags = false;
                    continue;
                }
                if let Some(found) = classify(self.schema, &token) {
                    self.apply_flag(found, &mut queue, &mut output.flags)?;
                    continue;
                }
                trace!(token = %token, "no matching flag, treating as positional");
            }

            if let Some(slot) = self.schema.args.get(output.argv.len()) {
                output.args.insert(slot.name.clone(), token.clone());
            }
            output.argv.push(token);
        }

        Ok(output)
    }

    fn apply_flag(
        &self,
        found: FlagMatch,
        queue: &mut TokenQueue,
        flags: &mut BTreeMap<String, FlagValue>,
    ) -> Result<()> {
        let flag = &self.schema.flags[found.index];
        if let Some(tail) = found.split_tail {
            trace!(flag = %flag.name, value = %tail, "split flag at '='");
            queue.push_front(tail);
        }

        match FlagShape::of(flag) {
            FlagShape::Value => {
                if flags.contains_key(&flag.name) {
                    return Err(ParseError::DuplicateFlag(flag.name.clone()));
                }
                let value = match (found.form, found.attached) {
                    (FlagForm::Short, Some(rest)) => Some(match rest.strip_prefix('=') {
                        Some(stripped) => stripped.to_string(),
                        None => rest,
                    }),
                    _ => queue.pop_front(),
                };
                let value = value.ok_or_else(|| ParseError::MissingFlagValue(flag.name.clone()))?;
                flags.insert(flag.name.clone(), FlagValue::String(value));
            }
            FlagShape::Boolean => {
                flags
                    .entry(flag.name.clone())
                    .or_insert(FlagValue::Bool(true));
                if let (FlagForm::Short, Some(rest)) = (found.form, found.attached) {
                    queue.push_front(format!("-{rest}"));
                }
            }
        }

        Ok(())
    }

    fn check_arity(&self, output: &ResolvedOutput) -> Result<()> {
        let count = output.argv.len();
        let max_args = self.schema.max_args();
        if !self.schema.variable_args && count > max_args {
            return Err(ParseError::UnexpectedArgument(output.argv[max_args].clone()));
        }

        if count < self.schema.min_args() {
            if let Some(missing) = self.schema.args.iter().skip(count).find(|a| a.is_required()) {
                return Err(ParseError::MissingRequiredArgument(missing.name.clone()));
            }
        }

        Ok(())
    }

    async fn transform_flags(&self, flags: &mut BTreeMap<String, FlagValue>) -> Result<()> {
        for flag in &self.schema.flags {
            if let Some(transform) = &flag.transform {
                let raw = match flags.remove(&flag.name) {
                    Some(FlagValue::String(raw)) => Some(raw),
                    _ => None,
                };
                debug!(flag = %flag.name, given = raw.is_some(), "running flag transform");
                let value = transform
                    .call(raw, self.schema.command.clone(), &flag.name)
                    .await
                    .map_err(ParseError::Transform)?;
                if !value.is_null() {
                    flags.insert(flag.name.clone(), value);
                }
            }

            check_required(flag, flags)?;
        }

        Ok(())
    }
}

fn check_required(flag: &FlagSpec, flags: &BTreeMap<String, FlagValue>) -> Result<()> {
    if flag.is_required() && flags.get(&flag.name).is_none_or(is_falsy) {
        return Err(ParseError::MissingRequiredFlag(flag.name.clone()));
    }
    Ok(())
}

/// Absent-like values: `null`, `false`, `""` and zero.
pub(crate) fn is_falsy(value: &FlagValue) -> bool {
    match value {
        FlagValue::Null => true,
        FlagValue::Bool(b) => !b,
        FlagValue::String(s) => s.is_empty(),
        FlagValue::Number(n) => n.as_f64() == Some(0.0),
        FlagValue::Array(_) | FlagValue::Object(_) => false,
    }
}

/// Resolves `tokens` against `schema`.
///
/// Shorthand for `Resolver::new(schema).parse(tokens)`.
pub async fn parse<I>(schema: &Schema, tokens: I) -> Result<ResolvedOutput>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Resolver::new(schema).parse(tokens).await
}
