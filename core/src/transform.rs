//! Value transform capability attached to individual flags.
//!
//! A transform converts a flag's raw string value into its final value. It is
//! owned by whoever declares the schema and invoked by the resolver once all
//! tokens have been classified. Transforms may suspend and may fail; a failure
//! is handed back to the caller untouched.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::CommandRef;

/// Resolved value of a flag.
///
/// Raw values are strings, boolean flags resolve to `true`, and a transform
/// may produce any JSON value. An unset flag has no entry at all.
pub type FlagValue = serde_json::Value;

/// Error raised by a transform. Propagated by the resolver without wrapping.
pub type TransformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Future returned by a [`FlagTransform`].
pub type TransformFuture = BoxFuture<'static, Result<FlagValue, TransformError>>;

/// Builds a [`TransformError`] from a plain message.
///
/// # Examples
///
/// ```
/// let err = argspec_core::transform_error("Expected a port number");
/// assert_eq!(err.to_string(), "Expected a port number");
/// ```
pub fn transform_error(message: impl Into<String>) -> TransformError {
    message.into().into()
}

/// Converts a flag's raw value into its final value.
///
/// Arguments are the raw value (absent when the flag was not given), the
/// owning command, if the schema carries one, and the flag's name.
pub trait FlagTransform: Send + Sync {
    fn transform(
        &self,
        raw: Option<String>,
        command: Option<Arc<CommandRef>>,
        flag: String,
    ) -> TransformFuture;
}

impl<F, Fut> FlagTransform for F
where
    F: Fn(Option<String>, Option<Arc<CommandRef>>, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FlagValue, TransformError>> + Send + 'static,
{
    fn transform(
        &self,
        raw: Option<String>,
        command: Option<Arc<CommandRef>>,
        flag: String,
    ) -> TransformFuture {
        (self)(raw, command, flag).boxed()
    }
}

/// Shared handle to a [`FlagTransform`].
///
/// Cloning is cheap, so a [`FlagSpec`](crate::FlagSpec) carrying a transform
/// stays `Clone`.
///
/// # Examples
///
/// ```
/// use argspec_core::{FlagValue, Transform};
///
/// let upper = Transform::from_fn(|raw: Option<String>, _, _| async move {
///     Ok(raw.map(|s| FlagValue::String(s.to_uppercase())).unwrap_or(FlagValue::Null))
/// });
///
/// let value = futures::executor::block_on(upper.call(Some("eu".into()), None, "region"));
/// assert_eq!(value.unwrap(), FlagValue::String("EU".into()));
/// ```
#[derive(Clone)]
pub struct Transform(Arc<dyn FlagTransform>);

impl Transform {
    /// Wraps any [`FlagTransform`] implementation.
    pub fn new(transform: impl FlagTransform + 'static) -> Self {
        Self(Arc::new(transform))
    }

    /// Wraps an async closure.
    ///
    /// Prefer this over [`Transform::new`] for closures: the bound lets the
    /// compiler infer the closure's parameter types.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Option<String>, Option<Arc<CommandRef>>, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FlagValue, TransformError>> + Send + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the transform.
    pub fn call(
        &self,
        raw: Option<String>,
        command: Option<Arc<CommandRef>>,
        flag: &str,
    ) -> TransformFuture {
        self.0.transform(raw, command, flag.to_string())
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl FlagTransform for Fixed {
        fn transform(
            &self,
            _raw: Option<String>,
            _command: Option<Arc<CommandRef>>,
            _flag: String,
        ) -> TransformFuture {
            let value = self.0;
            async move { Ok(FlagValue::String(value.to_string())) }.boxed()
        }
    }

    #[tokio::test]
    async fn test_trait_object_transform() {
        let t = Transform::new(Fixed("x"));
        let value = t.call(None, None, "flag").await.unwrap();
        assert_eq!(value, FlagValue::String("x".into()));
    }

    #[tokio::test]
    async fn test_closure_receives_arguments() {
        let t = Transform::from_fn(|raw: Option<String>, command: Option<Arc<CommandRef>>, flag| async move {
            let id = command.map(|c| c.id()).unwrap_or_default();
            Ok(FlagValue::String(format!("{id}/{flag}/{}", raw.unwrap_or_default())))
        });
        let command = Arc::new(CommandRef::new("apps").with_command("create"));
        let value = t.call(Some("v".into()), Some(command), "name").await.unwrap();
        assert_eq!(value, FlagValue::String("apps:create/name/v".into()));
    }

    #[tokio::test]
    async fn test_failure_keeps_message() {
        let t = Transform::from_fn(|_, _, _| async move { Err(transform_error("nope")) });
        let err = t.call(None, None, "flag").await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
