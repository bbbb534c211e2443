//! Stock flag transforms.
//!
//! Each constructor returns a [`Transform`] ready for
//! [`FlagSpec::with_transform`](argspec_core::FlagSpec::with_transform).
//! Unless noted, an absent value stays absent so the resolver's required
//! check still applies.

use argspec_core::{FlagValue, Transform, transform_error};

/// Keeps the raw string as is.
pub fn identity() -> Transform {
    Transform::from_fn(|raw, _, _| async move { Ok(raw.map(FlagValue::String).unwrap_or_default()) })
}

/// Parses the value as a signed 64-bit integer.
///
/// # Examples
///
/// ```
/// use argspec_core::{FlagSpec, Schema};
/// use argspec_resolver::{builtin, parse};
///
/// let schema = Schema::new().with_flag(FlagSpec::with_value("port").with_transform(builtin::integer()));
///
/// let output = futures::executor::block_on(parse(&schema, ["--port", "8080"])).unwrap();
/// assert_eq!(output.flag("port"), Some(&serde_json::json!(8080)));
///
/// let err = futures::executor::block_on(parse(&schema, ["--port", "http"])).unwrap_err();
/// assert_eq!(err.to_string(), "Expected an integer but received: http");
/// ```
pub fn integer() -> Transform {
    Transform::from_fn(|raw: Option<String>, _, _| async move {
        match raw {
            None => Ok(FlagValue::Null),
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) => Ok(FlagValue::from(n)),
                Err(_) => Err(transform_error(format!(
                    "Expected an integer but received: {raw}"
                ))),
            },
        }
    })
}

/// Accepts only one of `options`.
pub fn choice(options: &[&str]) -> Transform {
    let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    Transform::from_fn(move |raw: Option<String>, _, flag: String| {
        let options = options.clone();
        async move {
            match raw {
                None => Ok(FlagValue::Null),
                Some(raw) if options.contains(&raw) => Ok(FlagValue::String(raw)),
                Some(raw) => Err(transform_error(format!(
                    "Expected --{flag}=one of: {} but received: {raw}",
                    options.join(", ")
                ))),
            }
        }
    })
}

/// Fills in `default` when the flag was not given.
pub fn default_value(default: impl Into<String>) -> Transform {
    let default = default.into();
    Transform::from_fn(move |raw: Option<String>, _, _| {
        let value = raw.unwrap_or_else(|| default.clone());
        async move { Ok(FlagValue::String(value)) }
    })
}

/// Fills in the value of environment variable `var` when the flag was not
/// given. Stays absent if the variable is unset or empty.
pub fn env_default(var: impl Into<String>) -> Transform {
    let var = var.into();
    Transform::from_fn(move |raw: Option<String>, _, _| {
        let value = raw.or_else(|| std::env::var(&var).ok().filter(|v| !v.is_empty()));
        async move { Ok(value.map(FlagValue::String).unwrap_or_default()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identity() {
        let t = identity();
        assert_eq!(t.call(Some("x".into()), None, "f").await.unwrap(), FlagValue::from("x"));
        assert_eq!(t.call(None, None, "f").await.unwrap(), FlagValue::Null);
    }

    #[tokio::test]
    async fn test_integer_rejects_garbage() {
        let t = integer();
        assert_eq!(t.call(Some(" 42".into()), None, "n").await.unwrap(), FlagValue::from(42));
        let err = t.call(Some("4x".into()), None, "n").await.unwrap_err();
        assert_eq!(err.to_string(), "Expected an integer but received: 4x");
    }

    #[tokio::test]
    async fn test_choice() {
        let t = choice(&["json", "yaml"]);
        assert_eq!(
            t.call(Some("yaml".into()), None, "format").await.unwrap(),
            FlagValue::from("yaml")
        );
        let err = t.call(Some("xml".into()), None, "format").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected --format=one of: json, yaml but received: xml"
        );
    }

    #[tokio::test]
    async fn test_default_value() {
        let t = default_value("origin");
        assert_eq!(t.call(None, None, "remote").await.unwrap(), FlagValue::from("origin"));
        assert_eq!(
            t.call(Some("upstream".into()), None, "remote").await.unwrap(),
            FlagValue::from("upstream")
        );
    }

    #[tokio::test]
    async fn test_env_default_unset_stays_absent() {
        let t = env_default("ARGSPEC_TEST_SURELY_UNSET_VARIABLE");
        assert_eq!(t.call(None, None, "app").await.unwrap(), FlagValue::Null);
        assert_eq!(t.call(Some("a".into()), None, "app").await.unwrap(), FlagValue::from("a"));
    }
}
