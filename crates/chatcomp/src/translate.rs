//! Localization: translation rules and placeholder substitution.
//!
//! A `translate` component names a key (`"chat.type.text"`); a
//! [`TranslationProvider`] turns the key into a rule such as
//! `"<%s> %s"`, and [`substitute`] fills the rule's placeholders with the
//! already-rendered arguments.
//!
//! # Placeholders
//!
//! - `%s`, `%d` - the next unused argument
//! - `%1$s` .. `%9$s` (or `$d`) - the argument at that 1-based position
//!
//! Placeholders without a matching argument stay in the output verbatim.
//!
//! ```rust
//! use chatcomp::translate::substitute;
//!
//! let args = ["Alice".to_string(), "3".to_string()];
//! assert_eq!(
//!     substitute("Hello %s, you have %d items", &args),
//!     "Hello Alice, you have 3 items"
//! );
//! assert_eq!(substitute("%2$s then %1$s", &args), "3 then Alice");
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::component::kind_name;
use crate::error::TranslationError;

/// Placeholder escape character.
const PLACEHOLDER: char = '%';

/// Supplies the rule string for a translation key.
///
/// Implemented for any `Fn(&str) -> String`, so tests and callers can pass a
/// closure directly. What happens on a missing key is up to the provider.
pub trait TranslationProvider {
    fn rule(&self, key: &str) -> String;
}

impl<F> TranslationProvider for F
where
    F: Fn(&str) -> String,
{
    fn rule(&self, key: &str) -> String {
        self(key)
    }
}

/// Expands the placeholders of `rule` with `args` in a single pass.
pub fn substitute<S: AsRef<str>>(rule: &str, args: &[S]) -> String {
    let chars: Vec<char> = rule.chars().collect();
    let mut out = String::with_capacity(rule.len());
    let mut cursor = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != PLACEHOLDER {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        // %s / %d
        if matches!(chars.get(i + 1), Some('s' | 'd')) {
            if let Some(arg) = args.get(cursor) {
                out.push_str(arg.as_ref());
                cursor += 1;
            } else {
                out.push(chars[i]);
                out.push(chars[i + 1]);
            }
            i += 2;
            continue;
        }

        // %N$s / %N$d
        if let (Some(digit), Some('$'), Some('s' | 'd')) =
            (chars.get(i + 1), chars.get(i + 2), chars.get(i + 3))
        {
            if let Some(n @ 1..=9) = digit.to_digit(10) {
                match args.get(n as usize - 1) {
                    Some(arg) => {
                        out.push_str(arg.as_ref());
                        // Positional placeholders also advance the sequential cursor.
                        cursor += 1;
                    }
                    None => out.extend(&chars[i..i + 4]),
                }
                i += 4;
                continue;
            }
        }

        out.push(chars[i]);
        i += 1;
    }

    out
}

/// An in-memory translation catalog, typically loaded from a language file.
///
/// Language files are flat JSON objects mapping keys to rules:
///
/// ```rust
/// use chatcomp::translate::{Translations, TranslationProvider};
///
/// let translations = Translations::from_json_str(
///     r#"{"chat.type.text": "<%s> %s"}"#,
/// ).unwrap();
/// assert_eq!(translations.rule("chat.type.text"), "<%s> %s");
/// // Missing keys fall back to the key itself.
/// assert_eq!(translations.rule("no.such.key"), "no.such.key");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translations {
    rules: HashMap<String, String>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a language file's contents.
    pub fn from_json_str(json: &str) -> Result<Self, TranslationError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Reads and parses a language file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TranslationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TranslationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn from_value(value: Value) -> Result<Self, TranslationError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(TranslationError::NotAnObject {
                    found: kind_name(&other),
                })
            }
        };

        let mut rules = HashMap::with_capacity(map.len());
        for (key, rule) in map {
            match rule {
                Value::String(rule) => {
                    rules.insert(key, rule);
                }
                other => {
                    return Err(TranslationError::NonStringRule {
                        found: kind_name(&other),
                        key,
                    })
                }
            }
        }
        Ok(Self { rules })
    }

    /// Adds or replaces a rule.
    pub fn insert(&mut self, key: impl Into<String>, rule: impl Into<String>) {
        self.rules.insert(key.into(), rule.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.rules.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TranslationProvider for Translations {
    fn rule(&self, key: &str) -> String {
        match self.get(key) {
            Some(rule) => rule.to_string(),
            None => {
                debug!(key, "no translation rule; using key");
                key.to_string()
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    mod sequential {
        use super::*;

        #[test]
        fn fills_in_order() {
            assert_eq!(
                substitute("Hello %s, you have %d items", &args(&["Alice", "3"])),
                "Hello Alice, you have 3 items"
            );
        }

        #[test]
        fn exhausted_placeholder_left_literal() {
            assert_eq!(substitute("%s %s", &args(&["only"])), "only %s");
        }

        #[test]
        fn no_args_leaves_rule_untouched() {
            assert_eq!(substitute("%s and %d", &args(&[])), "%s and %d");
        }

        #[test]
        fn surplus_args_ignored() {
            assert_eq!(substitute("[%s]", &args(&["a", "b"])), "[a]");
        }

        #[test]
        fn adjacent_placeholders() {
            assert_eq!(substitute("%s%s%s", &args(&["a", "b", "c"])), "abc");
        }
    }

    mod positional {
        use super::*;

        #[test]
        fn selects_by_index() {
            assert_eq!(
                substitute("%2$s then %1$s", &args(&["first", "second"])),
                "second then first"
            );
        }

        #[test]
        fn d_suffix_accepted() {
            assert_eq!(substitute("%1$d", &args(&["7"])), "7");
        }

        #[test]
        fn out_of_range_left_literal() {
            assert_eq!(substitute("%3$s!", &args(&["a", "b"])), "%3$s!");
        }

        #[test]
        fn zero_position_left_literal() {
            assert_eq!(substitute("%0$s", &args(&["a"])), "%0$s");
        }

        #[test]
        fn bumps_sequential_cursor() {
            // %1$s consumes the cursor slot, so the following %s takes "b".
            assert_eq!(substitute("%1$s %s", &args(&["a", "b"])), "a b");
            assert_eq!(substitute("%2$s %s", &args(&["a", "b"])), "b b");
        }

        #[test]
        fn unresolved_positional_does_not_bump() {
            assert_eq!(substitute("%5$s %s", &args(&["a"])), "%5$s a");
        }
    }

    mod literals {
        use super::*;

        #[test]
        fn plain_text_copied() {
            assert_eq!(substitute("no placeholders", &args(&["x"])), "no placeholders");
        }

        #[test]
        fn unknown_escape_copied() {
            assert_eq!(substitute("100%% %x %", &args(&["a"])), "100%% %x %");
        }

        #[test]
        fn incomplete_positional_copied() {
            assert_eq!(substitute("%1$", &args(&["a"])), "%1$");
            assert_eq!(substitute("%1s", &args(&["a"])), "%1s");
        }

        #[test]
        fn multibyte_text_preserved() {
            assert_eq!(substitute("é %s ü", &args(&["ß"])), "é ß ü");
        }

        #[test]
        fn arguments_are_not_rescanned() {
            assert_eq!(substitute("%s %s", &args(&["%s", "x"])), "%s x");
        }
    }

    mod catalog {
        use super::*;

        #[test]
        fn loads_flat_object() {
            let t = Translations::from_json_str(r#"{"a": "A %s", "b": "B"}"#).unwrap();
            assert_eq!(t.len(), 2);
            assert_eq!(t.get("a"), Some("A %s"));
        }

        #[test]
        fn rejects_non_object() {
            let err = Translations::from_json_str("[]").unwrap_err();
            assert!(matches!(err, TranslationError::NotAnObject { found: "array" }));
        }

        #[test]
        fn rejects_non_string_rule() {
            let err = Translations::from_json_str(r#"{"a": 1}"#).unwrap_err();
            assert!(matches!(
                err,
                TranslationError::NonStringRule { ref key, .. } if key == "a"
            ));
        }

        #[test]
        fn missing_key_returns_key() {
            let t = Translations::new();
            assert!(t.is_empty());
            assert_eq!(t.rule("death.attack.generic"), "death.attack.generic");
        }

        #[test]
        fn insert_and_collect() {
            let mut t: Translations = [("x", "X")].into_iter().collect();
            t.insert("y", "Y");
            assert_eq!(t.rule("x"), "X");
            assert_eq!(t.rule("y"), "Y");
        }

        #[test]
        fn from_path_reads_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("en_us.json");
            std::fs::write(&path, r#"{"chat.type.text": "<%s> %s"}"#).unwrap();
            let t = Translations::from_path(&path).unwrap();
            assert_eq!(t.rule("chat.type.text"), "<%s> %s");
        }

        #[test]
        fn from_path_missing_file() {
            let err = Translations::from_path("/nonexistent/lang.json").unwrap_err();
            assert!(matches!(err, TranslationError::Io { .. }));
        }

        #[test]
        fn closures_are_providers() {
            let provider = |key: &str| format!("<{}>", key);
            assert_eq!(provider.rule("k"), "<k>");
        }
    }
}
