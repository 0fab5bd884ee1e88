//! `${name}` placeholder expansion
//!
//! A [`MessagePlaceholder`] owns a set of default replacement values. Formatting
//! a template resolves every `${key}` against the call-site overrides first,
//! then the defaults, and finally the literal `none`.
//!
//! # Example
//!
//! ```
//! use message_translator::{MessagePlaceholder, Replacements};
//!
//! let mut placeholder = MessagePlaceholder::new();
//! placeholder.add_default_replacements(&Replacements::new().with("app", "Voxify"));
//!
//! let values = Replacements::new().with("name", "John").with("count", 3);
//! assert_eq!(
//!     placeholder.format("${app}: Hello, ${name}! You have ${count} messages.", Some(&values)),
//!     "Voxify: Hello, John! You have 3 messages."
//! );
//! ```

use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Substituted for a placeholder that has no usable value
pub const MISSING_VALUE: &str = "none";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// A single replacement value
///
/// Values are stringified at substitution time. Empty strings, zero, NaN and
/// `false` count as "no value" and resolve to [`MISSING_VALUE`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReplacementValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ReplacementValue {
    /// Whether the value is usable as a substitution
    pub fn is_truthy(&self) -> bool {
        match self {
            ReplacementValue::Bool(b) => *b,
            ReplacementValue::Int(i) => *i != 0,
            ReplacementValue::Float(f) => *f != 0.0 && !f.is_nan(),
            ReplacementValue::Str(s) => !s.is_empty(),
        }
    }
}

impl std::fmt::Display for ReplacementValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplacementValue::Bool(b) => write!(f, "{}", b),
            ReplacementValue::Int(i) => write!(f, "{}", i),
            ReplacementValue::Float(x) => write!(f, "{}", x),
            ReplacementValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ReplacementValue {
    fn from(value: &str) -> Self {
        ReplacementValue::Str(value.to_string())
    }
}

impl From<String> for ReplacementValue {
    fn from(value: String) -> Self {
        ReplacementValue::Str(value)
    }
}

impl From<&String> for ReplacementValue {
    fn from(value: &String) -> Self {
        ReplacementValue::Str(value.clone())
    }
}

impl From<bool> for ReplacementValue {
    fn from(value: bool) -> Self {
        ReplacementValue::Bool(value)
    }
}

impl From<f64> for ReplacementValue {
    fn from(value: f64) -> Self {
        ReplacementValue::Float(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ReplacementValue {
                fn from(value: $t) -> Self {
                    ReplacementValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Values beyond i64::MAX keep their exact decimal text
macro_rules! impl_from_wide_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ReplacementValue {
                fn from(value: $t) -> Self {
                    match i64::try_from(value) {
                        Ok(v) => ReplacementValue::Int(v),
                        Err(_) => ReplacementValue::Str(value.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_uint!(u64, usize);

/// A set of named replacement values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Replacements(HashMap<String, ReplacementValue>);

impl Replacements {
    pub fn new() -> Self {
        Replacements(HashMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ReplacementValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ReplacementValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ReplacementValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ReplacementValue)> {
        self.0.iter()
    }

    /// Merge `other` into `self`; values from `other` win on shared keys
    pub fn extend_from(&mut self, other: &Replacements) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Positional values keyed by their index: `"0"`, `"1"`, ...
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ReplacementValue>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.into()))
            .collect()
    }

    /// Fold a mixed argument list into one override set
    ///
    /// Named arguments contribute all their entries; a positional argument is
    /// stored under its index in `args` (named arguments count towards the index).
    pub fn from_args(args: &[TranslationArg]) -> Self {
        let mut replacements = Replacements::new();
        for (i, arg) in args.iter().enumerate() {
            match arg {
                TranslationArg::Named(named) => replacements.extend_from(named),
                TranslationArg::Positional(value) => {
                    replacements.0.insert(i.to_string(), value.clone());
                }
            }
        }
        replacements
    }

    /// Parse a JSON object of scalar values
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve `key` to a usable value, if there is one
    fn lookup(&self, key: &str) -> Option<&ReplacementValue> {
        self.0.get(key).filter(|value| value.is_truthy())
    }
}

impl<K: Into<String>> FromIterator<(K, ReplacementValue)> for Replacements {
    fn from_iter<T: IntoIterator<Item = (K, ReplacementValue)>>(iter: T) -> Self {
        Replacements(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One call-site argument: either a positional value or a named set
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationArg {
    Positional(ReplacementValue),
    Named(Replacements),
}

impl From<ReplacementValue> for TranslationArg {
    fn from(value: ReplacementValue) -> Self {
        TranslationArg::Positional(value)
    }
}

macro_rules! impl_positional_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TranslationArg {
                fn from(value: $t) -> Self {
                    TranslationArg::Positional(value.into())
                }
            }
        )*
    };
}

impl_positional_arg!(&str, String, bool, f64, i32, i64, u32, u64, usize);

impl From<Replacements> for TranslationArg {
    fn from(value: Replacements) -> Self {
        TranslationArg::Named(value)
    }
}

/// Template formatter with instance-level default replacements
#[derive(Debug, Clone, Default)]
pub struct MessagePlaceholder {
    default_replacements: Replacements,
}

impl MessagePlaceholder {
    pub fn new() -> Self {
        MessagePlaceholder {
            default_replacements: Replacements::new(),
        }
    }

    /// Replace every `${key}` in `template`
    ///
    /// A key resolves to its override value if present and truthy, then to its
    /// default value under the same condition, and otherwise to `none`.
    pub fn format(&self, template: &str, overrides: Option<&Replacements>) -> String {
        placeholder_pattern()
            .replace_all(template, |caps: &Captures| {
                let key = &caps[1];
                overrides
                    .and_then(|o| o.lookup(key))
                    .or_else(|| self.default_replacements.lookup(key))
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| MISSING_VALUE.to_string())
            })
            .into_owned()
    }

    /// Same as [`MessagePlaceholder::format`]
    pub fn fast_format(&self, template: &str, overrides: Option<&Replacements>) -> String {
        self.format(template, overrides)
    }

    pub fn add_default_replacements(&mut self, additional: &Replacements) {
        if additional.is_empty() {
            return;
        }
        self.default_replacements.extend_from(additional);
    }

    /// A copy of the current defaults
    pub fn default_replacements(&self) -> Replacements {
        self.default_replacements.clone()
    }

    pub fn set_default_replacements(&mut self, defaults: Option<&Replacements>) {
        self.default_replacements = defaults.cloned().unwrap_or_default();
    }
}
