//! End-to-end tests: folders on disk -> loaded translator -> formatted messages

use crate::{LoadError, MessageMap, Replacements, TranslationArg, Translator};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/locales")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn loaded_fixtures() -> Translator {
    let mut translator = Translator::new(Replacements::new());
    translator
        .load_translations_from_folder(fixtures(), "en")
        .unwrap();
    translator
}

#[test]
fn test_loading_a_language_folder() {
    let translator = loaded_fixtures();

    let expected: MessageMap = [("lang.hello", "Hello!")].into_iter().collect();
    assert_eq!(translator.default_fallback(), Some(&expected));

    let languages = translator.available_languages();
    assert_eq!(languages.len(), 2);
    assert!(languages.contains(&"en".to_string()));
    assert!(languages.contains(&"de".to_string()));
}

#[test]
fn test_translate_defaults_to_en() {
    let translator = loaded_fixtures();
    assert_eq!(translator.translate("lang.hello", &Replacements::new()), "Hello!");
}

#[test]
fn test_translate_to_given_language() {
    let translator = loaded_fixtures();
    let none = Replacements::new();
    assert_eq!(translator.translate_to("de", "lang.hello", &none), "Hallo!");
    assert_eq!(translator.translate_to("en", "lang.hello", &none), "Hello!");
}

#[test]
fn test_translate_to_missing_language_uses_default() {
    let translator = loaded_fixtures();
    let none = Replacements::new();
    assert_eq!(
        translator.translate_to("fr", "lang.hello", &none),
        translator.translate("lang.hello", &none)
    );
}

#[test]
fn test_default_language_not_loaded_uses_first_folder() {
    let translator = {
        let mut t = Translator::default();
        t.load_translations_from_folder(fixtures(), "fr").unwrap();
        t
    };
    // "de" sorts before "en"
    assert_eq!(translator.translate("lang.hello", &Replacements::new()), "Hallo!");
}

#[test]
fn test_default_language_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "de/lang.json", r#"{"hello": "Hallo!"}"#);
    write(dir.path(), "EN-gb/lang.json", r#"{"hello": "Hello, mate!"}"#);

    let mut translator = Translator::default();
    translator
        .load_translations_from_folder(dir.path(), "en-GB")
        .unwrap();

    assert_eq!(
        translator.translate("lang.hello", &Replacements::new()),
        "Hello, mate!"
    );
    assert_eq!(
        translator.translate_to("En-Gb", "lang.hello", &Replacements::new()),
        "Hello, mate!"
    );
    assert_eq!(translator.available_languages(), vec!["en-GB", "de"]);
}

#[test]
fn test_empty_default_language_still_wins() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "de/lang.json", r#"{"hello": "Hallo!"}"#);
    fs::create_dir_all(dir.path().join("en")).unwrap();

    let mut translator = Translator::default();
    translator.load_translations(dir.path()).unwrap();

    assert_eq!(translator.default_fallback(), Some(&MessageMap::new()));
    assert_eq!(
        translator.translate("lang.hello", &Replacements::new()),
        "lang.hello"
    );
    assert_eq!(
        translator.translate_to("de", "lang.hello", &Replacements::new()),
        "Hallo!"
    );
}

#[test]
fn test_provisional_fallback_skips_languages_without_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("aa")).unwrap();
    write(dir.path(), "de/lang.json", r#"{"hello": "Hallo!"}"#);

    let mut translator = Translator::default();
    translator
        .load_translations_from_folder(dir.path(), "xx")
        .unwrap();

    assert_eq!(translator.available_languages(), vec!["aa", "de"]);
    assert_eq!(
        translator.translate("lang.hello", &Replacements::new()),
        "Hallo!"
    );
}

#[test]
fn test_nested_folders_and_objects() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "en/ui/menu.json",
        r#"{"file": {"open": "Open ${0}", "recent": {"title": "Recent"}}}"#,
    );
    write(dir.path(), "en/lang.json", r#"{"greeting": {"hello": "Hello!"}}"#);
    write(dir.path(), "en/notes.txt", "not a translation");

    let mut translator = Translator::default();
    translator.load_translations(dir.path()).unwrap();

    let fallback = translator.default_fallback().unwrap();
    assert_eq!(fallback.len(), 3);
    assert_eq!(
        translator.translate_args("ui.menu.file.open", &["report.txt".into()]),
        "Open report.txt"
    );
    assert_eq!(
        translator.translate("ui.menu.file.recent.title", &Replacements::new()),
        "Recent"
    );
    assert_eq!(
        translator.translate("lang.greeting.hello", &Replacements::new()),
        "Hello!"
    );
}

#[test]
fn test_named_and_positional_arguments() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "en/chat.json",
        r#"{"inbox": "Hello, ${name}! You have ${1} messages in ${folder}."}"#,
    );

    let mut translator = Translator::new(Replacements::new().with("folder", "Inbox"));
    translator.load_translations(dir.path()).unwrap();

    let args = vec![
        TranslationArg::from(Replacements::new().with("name", "John")),
        TranslationArg::from(3),
    ];
    assert_eq!(
        translator.translate_args("chat.inbox", &args),
        "Hello, John! You have 3 messages in Inbox."
    );

    let zero = vec![
        TranslationArg::from(Replacements::new().with("name", "John")),
        TranslationArg::from(0),
    ];
    assert_eq!(
        translator.translate_to_args("de", "chat.inbox", &zero),
        "Hello, John! You have none messages in Inbox."
    );
}

#[test]
fn test_malformed_json_keeps_previous_state() {
    let mut translator = loaded_fixtures();

    let dir = TempDir::new().unwrap();
    write(dir.path(), "en/lang.json", r#"{"hello": "Hi!"}"#);
    write(dir.path(), "fr/lang.json", r#"{"hello": "#);

    let err = translator.load_translations(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.path().ends_with("fr/lang.json"));

    assert_eq!(translator.translate("lang.hello", &Replacements::new()), "Hello!");
    assert_eq!(
        translator.translate_to("de", "lang.hello", &Replacements::new()),
        "Hallo!"
    );
}

#[test]
fn test_missing_folder_keeps_previous_state() {
    let mut translator = loaded_fixtures();
    let err = translator
        .load_translations("definitely/not/here")
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(translator.available_languages().len(), 2);
}

#[test]
fn test_reload_replaces_everything() {
    let mut translator = loaded_fixtures();

    let dir = TempDir::new().unwrap();
    write(dir.path(), "fr/lang.json", r#"{"hello": "Bonjour !"}"#);
    translator.load_translations(dir.path()).unwrap();

    assert_eq!(translator.available_languages(), vec!["fr"]);
    assert!(!translator.has_language("de"));
    assert_eq!(
        translator.translate("lang.hello", &Replacements::new()),
        "Bonjour !"
    );
    assert_eq!(
        translator.translate_to("de", "lang.hello", &Replacements::new()),
        "Bonjour !"
    );
}

#[test]
fn test_case_colliding_folders_later_one_wins() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "EN/lang.json", r#"{"hello": "HELLO!", "only_upper": "Upper"}"#);
    write(dir.path(), "de/lang.json", r#"{"hello": "Hallo!"}"#);
    write(dir.path(), "en/lang.json", r#"{"hello": "hello!"}"#);

    let mut translator = Translator::default();
    translator.load_translations(dir.path()).unwrap();

    // "EN" sorts first, so "en" keeps its position but takes the later folder's messages
    assert_eq!(translator.available_languages(), vec!["en", "de"]);
    let none = Replacements::new();
    assert_eq!(translator.translate("lang.hello", &none), "hello!");
    assert_eq!(translator.translate_to("EN", "lang.hello", &none), "hello!");
    assert_eq!(
        translator.translate("lang.only_upper", &none),
        "lang.only_upper"
    );
}
