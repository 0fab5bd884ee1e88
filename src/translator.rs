use crate::MessageMap;
use crate::error::LoadResult;
use crate::loader::{self, LanguageMessages};
use crate::placeholder::{MessagePlaceholder, Replacements, TranslationArg};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Language used for the fallback table when the caller has no preference
pub const DEFAULT_LANGUAGE: &str = "en";

/// Upper-case everything from the last `-` on: `en-gb` -> `en-GB`
///
/// Strings without a `-` are returned unchanged.
pub fn uppercase_suffix(input: &str) -> String {
    match input.rfind('-') {
        Some(index) => {
            let (prefix, suffix) = input.split_at(index);
            format!("{}{}", prefix, suffix.to_uppercase())
        }
        None => input.to_string(),
    }
}

/// Per-language message tables with a fallback language and placeholder formatting
#[derive(Debug, Clone, Default)]
pub struct Translator {
    placeholder: MessagePlaceholder,
    // Keyed by lower-cased language, then by dotted message key
    // e.g. translations["en"]["lang.hello"] = "Hello!"
    //      translations["de"]["lang.hello"] = "Hallo!"
    translations: HashMap<String, MessageMap>,
    // Lower-cased languages in the order they were first added
    languages: Vec<String>,
    fallback: Option<String>,
}

impl Translator {
    pub fn new(default_replacements: Replacements) -> Self {
        let mut placeholder = MessagePlaceholder::new();
        placeholder.add_default_replacements(&default_replacements);
        Translator {
            placeholder,
            translations: HashMap::new(),
            languages: Vec::new(),
            fallback: None,
        }
    }

    /// Add (or replace) the table for one language
    ///
    /// The first table added becomes the fallback until a load picks another one.
    pub fn with_messages_for_locale(&mut self, locale: &str, messages: MessageMap) -> &mut Self {
        let language = locale.to_lowercase();
        if self.translations.insert(language.clone(), messages).is_none() {
            self.languages.push(language.clone());
        }
        if self.fallback.is_none() {
            self.fallback = Some(language);
        }
        self
    }

    /// Load `root/<language>/**/*.json` using [`DEFAULT_LANGUAGE`] as the default
    pub fn load_translations(&mut self, root: impl AsRef<Path>) -> LoadResult<()> {
        self.load_translations_from_folder(root, DEFAULT_LANGUAGE)
    }

    /// Rebuild every table from `root/<language>/**/*.json`
    ///
    /// The fallback table is `default_language` when it was found, otherwise the
    /// first language that had at least one file. On error nothing is replaced:
    /// the translator keeps serving whatever it had before.
    pub fn load_translations_from_folder(
        &mut self,
        root: impl AsRef<Path>,
        default_language: &str,
    ) -> LoadResult<()> {
        let root = root.as_ref();
        let loaded = loader::load_all_languages(root).inspect_err(|e| {
            error!(
                "Error loading translations from folder '{}': {}",
                root.display(),
                e
            );
        })?;

        let mut translations = HashMap::new();
        let mut languages = Vec::new();
        let mut fallback = None;

        for LanguageMessages {
            name,
            messages,
            file_count,
        } in loaded
        {
            let language = name.to_lowercase();
            if fallback.is_none() && file_count > 0 {
                fallback = Some(language.clone());
            }
            if translations.insert(language.clone(), messages).is_some() {
                warn!(
                    "Language folder '{}' replaces an earlier folder with the same name",
                    name
                );
            } else {
                languages.push(language);
            }
        }

        let default_language = default_language.to_lowercase();
        if translations.contains_key(&default_language) {
            fallback = Some(default_language);
        }

        if languages.is_empty() {
            warn!("No language folders found in '{}'", root.display());
        }
        info!(
            "Loaded {} languages from '{}' (fallback: {})",
            languages.len(),
            root.display(),
            fallback.as_deref().unwrap_or("none")
        );

        self.translations = translations;
        self.languages = languages;
        self.fallback = fallback;
        Ok(())
    }

    /// Translate `key` using the fallback table
    ///
    /// Missing (or empty) messages resolve to the key itself.
    pub fn translate(&self, key: &str, replacements: &Replacements) -> String {
        let message = self.fallback_message(key).unwrap_or_else(|| {
            debug!("No message for '{}' in the fallback table", key);
            key
        });
        self.placeholder.format(message, Some(replacements))
    }

    /// Translate `key` into `locale`, falling back to [`Translator::translate`]
    pub fn translate_to(&self, locale: &str, key: &str, replacements: &Replacements) -> String {
        let language = locale.to_lowercase();
        if let Some(message) = self
            .translations
            .get(&language)
            .and_then(|messages| messages.get_message(key))
        {
            return self.placeholder.format(message, Some(replacements));
        }

        debug!(
            "Fallback: message '{}' not found for '{}', using fallback table",
            key, locale
        );
        self.translate(key, replacements)
    }

    /// [`Translator::translate`] with positional and named arguments
    pub fn translate_args(&self, key: &str, args: &[TranslationArg]) -> String {
        self.translate(key, &Replacements::from_args(args))
    }

    /// [`Translator::translate_to`] with positional and named arguments
    pub fn translate_to_args(&self, locale: &str, key: &str, args: &[TranslationArg]) -> String {
        self.translate_to(locale, key, &Replacements::from_args(args))
    }

    pub fn default_fallback(&self) -> Option<&MessageMap> {
        self.fallback
            .as_ref()
            .and_then(|language| self.translations.get(language))
    }

    /// Loaded languages in load order, formatted for display (`en-gb` -> `en-GB`)
    pub fn available_languages(&self) -> Vec<String> {
        self.languages
            .iter()
            .map(|language| uppercase_suffix(language))
            .collect()
    }

    pub fn has_language(&self, locale: &str) -> bool {
        self.translations.contains_key(&locale.to_lowercase())
    }

    pub fn messages_for(&self, locale: &str) -> Option<&MessageMap> {
        self.translations.get(&locale.to_lowercase())
    }

    pub fn placeholder(&self) -> &MessagePlaceholder {
        &self.placeholder
    }

    pub fn placeholder_mut(&mut self) -> &mut MessagePlaceholder {
        &mut self.placeholder
    }

    pub fn add_default_replacements(&mut self, additional: &Replacements) {
        self.placeholder.add_default_replacements(additional);
    }

    pub fn default_replacements(&self) -> Replacements {
        self.placeholder.default_replacements()
    }

    pub fn set_default_replacements(&mut self, defaults: Option<&Replacements>) {
        self.placeholder.set_default_replacements(defaults);
    }

    fn fallback_message(&self, key: &str) -> Option<&str> {
        self.default_fallback()
            .and_then(|messages| messages.get_message(key))
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }
}
