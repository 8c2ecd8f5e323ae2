use std::fmt;
use std::sync::Arc;

/// Transform applied to struct field names when a payload is serialized.
///
/// Map keys are never touched: they are already explicit strings chosen by
/// the caller, not declared identifiers.
///
/// The case-changing policies split a name into words first:
///
/// - `_` and `-` separate words and are dropped,
/// - every uppercase letter starts a new word (so `URL` is three words).
///
/// The words are then rejoined by the policy, e.g. `LowerCaseWithDashes`
/// turns both `aString` and `a_string` into `a-string`.
#[derive(Clone, Default)]
pub enum FieldNamingPolicy {
    /// Emit field names exactly as declared (after any serde renames).
    #[default]
    Identity,
    /// `aString` -> `a-string`
    LowerCaseWithDashes,
    /// `aString` -> `a_string`
    LowerCaseWithUnderscores,
    /// `aString` -> `a.string`
    LowerCaseWithDots,
    /// `a_string` -> `AString`
    UpperCamelCase,
    /// `a_string` -> `aString`
    LowerCamelCase,
    /// Caller-supplied transform.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl FieldNamingPolicy {
    /// Wrap a closure as a naming policy.
    pub fn custom<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        FieldNamingPolicy::Custom(Arc::new(transform))
    }

    /// Translate a declared field name into the emitted JSON key.
    pub fn apply(&self, name: &str) -> String {
        match self {
            FieldNamingPolicy::Identity => name.to_string(),
            FieldNamingPolicy::LowerCaseWithDashes => join_lower(name, "-"),
            FieldNamingPolicy::LowerCaseWithUnderscores => join_lower(name, "_"),
            FieldNamingPolicy::LowerCaseWithDots => join_lower(name, "."),
            FieldNamingPolicy::UpperCamelCase => camel(name, true),
            FieldNamingPolicy::LowerCamelCase => camel(name, false),
            FieldNamingPolicy::Custom(transform) => transform(name),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, FieldNamingPolicy::Identity)
    }
}

impl fmt::Debug for FieldNamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldNamingPolicy::Identity => write!(f, "Identity"),
            FieldNamingPolicy::LowerCaseWithDashes => write!(f, "LowerCaseWithDashes"),
            FieldNamingPolicy::LowerCaseWithUnderscores => write!(f, "LowerCaseWithUnderscores"),
            FieldNamingPolicy::LowerCaseWithDots => write!(f, "LowerCaseWithDots"),
            FieldNamingPolicy::UpperCamelCase => write!(f, "UpperCamelCase"),
            FieldNamingPolicy::LowerCamelCase => write!(f, "LowerCamelCase"),
            FieldNamingPolicy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn join_lower(name: &str, separator: &str) -> String {
    let words = split_words(name);
    if words.is_empty() {
        return name.to_string();
    }
    words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn camel(name: &str, upper_first: bool) -> String {
    let words = split_words(name);
    if words.is_empty() {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 && !upper_first {
            out.push_str(&word.to_lowercase());
        } else {
            capitalize_into(&mut out, word);
        }
    }
    out
}

fn capitalize_into(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}
