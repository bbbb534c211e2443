//! Flag classification of single tokens.
//!
//! Classification is pure: it looks a token up in the schema and reports how
//! the token matched, without touching the token queue. The resolver applies
//! the result afterwards, so a failed `--name=value` split needs no undo.

use argspec_core::{FlagSpec, Schema};

/// How a flag was addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagForm {
    /// `--name`
    Long,
    /// `-c`, possibly followed by more characters.
    Short,
}

/// Whether a matched flag consumes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagShape {
    Value,
    Boolean,
}

impl FlagShape {
    pub fn of(flag: &FlagSpec) -> Self {
        if flag.consumes_value() {
            Self::Value
        } else {
            Self::Boolean
        }
    }
}

/// A token that resolved to a declared flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMatch {
    /// Index of the flag in [`Schema::flags`].
    pub index: usize,
    pub form: FlagForm,
    /// Characters following the alias of a short-form token: `bc` for `-abc`.
    pub attached: Option<String>,
    /// Right-hand side of an `=` split. Goes back on the front of the queue
    /// before the flag is applied.
    pub split_tail: Option<String>,
}

/// Classifies `token` against the schema's flags.
///
/// A token starting with `--` is looked up by long name, any other dashed
/// token by its second character. When neither matches and the token contains
/// `=`, the part before the first `=` is classified instead and the rest is
/// carried as [`FlagMatch::split_tail`]. Returns `None` for tokens that are
/// not flags; the caller treats those as positional.
///
/// # Examples
///
/// ```
/// use argspec_core::{FlagSpec, Schema};
/// use argspec_resolver::{FlagForm, classify};
///
/// let schema = Schema::new().with_flag(FlagSpec::with_value("remote").with_char('r'));
///
/// let m = classify(&schema, "--remote=origin").unwrap();
/// assert_eq!(m.form, FlagForm::Long);
/// assert_eq!(m.split_tail.as_deref(), Some("origin"));
///
/// let m = classify(&schema, "-rorigin").unwrap();
/// assert_eq!(m.attached.as_deref(), Some("origin"));
///
/// assert!(classify(&schema, "--region=eu").is_none());
/// ```
pub fn classify(schema: &Schema, token: &str) -> Option<FlagMatch> {
    if let Some(found) = lookup(schema, token) {
        return Some(found);
    }

    let (head, tail) = token.split_once('=')?;
    // `head` holds no `=`, so this recursion is at most one level deep.
    let mut found = classify(schema, head)?;
    found.split_tail = Some(tail.to_string());
    Some(found)
}

fn lookup(schema: &Schema, token: &str) -> Option<FlagMatch> {
    if let Some(name) = token.strip_prefix("--") {
        let index = schema.position_long(name)?;
        return Some(FlagMatch {
            index,
            form: FlagForm::Long,
            attached: None,
            split_tail: None,
        });
    }

    let mut chars = token.strip_prefix('-')?.chars();
    let short = chars.next()?;
    let index = schema.position_short(short)?;
    let rest = chars.as_str();
    Some(FlagMatch {
        index,
        form: FlagForm::Short,
        attached: (!rest.is_empty()).then(|| rest.to_string()),
        split_tail: None,
    })
}
