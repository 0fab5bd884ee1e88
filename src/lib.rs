//! Load nested JSON translation folders and format `${placeholder}` messages
//!
//! Translations live in `root/<language>/**/*.json`. Every file is flattened
//! into dotted keys prefixed by its path: `en/ui/menu.json` containing
//! `{"file": {"open": "Open"}}` becomes `ui.menu.file.open`.
//!
//! ```no_run
//! use message_translator::{Replacements, Translator};
//!
//! let mut translator = Translator::new(Replacements::new().with("app", "Voxify"));
//! translator.load_translations_from_folder("locales", "en")?;
//!
//! let values = Replacements::new().with("name", "Ada");
//! println!("{}", translator.translate_to("de", "lang.welcome", &values));
//! # Ok::<(), message_translator::LoadError>(())
//! ```

use std::collections::HashMap;

pub mod error;
pub mod loader;
pub mod placeholder;
pub mod translator;

#[cfg(test)]
mod integration_tests;

pub use error::{LoadError, LoadResult};
pub use loader::{load_all_languages, load_language_dir, load_messages_from_file};
pub use placeholder::{
    MISSING_VALUE, MessagePlaceholder, ReplacementValue, Replacements, TranslationArg,
};
pub use translator::{DEFAULT_LANGUAGE, Translator, uppercase_suffix};

/// One language's catalog of dotted key -> message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageMap(pub HashMap<String, String>);

impl MessageMap {
    pub fn new() -> Self {
        MessageMap(HashMap::new())
    }
    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.0.insert(key.to_owned(), message.to_owned());
        self
    }
    pub fn get_message(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }
    pub fn get_messages(&self) -> &HashMap<String, String> {
        &self.0
    }
    /// The message for `key`, or the key itself
    pub fn get(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_else(|| key.to_string())
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
    /// Merge `other` in; its messages replace existing ones with the same key
    pub fn extend(&mut self, other: MessageMap) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        MessageMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
