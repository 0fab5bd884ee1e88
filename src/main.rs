use clap::{Arg, ArgAction, Command};
use message_translator::{DEFAULT_LANGUAGE, Replacements, Translator};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("message-translator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Look up and format messages from a folder of JSON translations")
        .arg(
            Arg::new("folder")
                .help("Folder containing one subfolder per language")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("key")
                .help("Dotted message key, e.g. lang.hello")
                .required_unless_present("list")
                .index(2),
        )
        .arg(
            Arg::new("args")
                .help("Positional replacements, available as ${0}, ${1}, ...")
                .num_args(0..)
                .index(3),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .short('l')
                .help("Target language (default: the fallback language)"),
        )
        .arg(
            Arg::new("default-lang")
                .long("default-lang")
                .short('d')
                .help("Language used as fallback")
                .default_value(DEFAULT_LANGUAGE),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .short('s')
                .help("Named replacement NAME=VALUE (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("defaults")
                .long("defaults")
                .help("JSON file with default replacements"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("Print the available languages and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let defaults = match matches.get_one::<String>("defaults") {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read defaults '{}': {}", path, e))?;
            Replacements::from_json_str(&content)
                .map_err(|e| format!("Invalid defaults in '{}': {}", path, e))?
        }
        None => Replacements::new(),
    };

    let folder = matches
        .get_one::<String>("folder")
        .ok_or("missing folder")?;
    let default_lang = matches
        .get_one::<String>("default-lang")
        .map(String::as_str)
        .unwrap_or(DEFAULT_LANGUAGE);

    let mut translator = Translator::new(defaults);
    if !load_folder(&mut translator, folder, default_lang) {
        std::process::exit(1);
    }

    if matches.get_flag("list") {
        for language in translator.available_languages() {
            println!("{}", language);
        }
        return Ok(());
    }

    let key = matches.get_one::<String>("key").ok_or("missing key")?;

    let mut replacements = Replacements::positional(
        matches
            .get_many::<String>("args")
            .into_iter()
            .flatten()
            .cloned(),
    );
    for pair in matches.get_many::<String>("set").into_iter().flatten() {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected NAME=VALUE, got '{}'", pair))?;
        replacements.insert(name, value);
    }

    let message = match matches.get_one::<String>("lang") {
        Some(lang) => translator.translate_to(lang, key, &replacements),
        None => translator.translate(key, &replacements),
    };
    println!("{}", message);

    Ok(())
}

/// Load `folder` into `translator`, returning whether it succeeded
///
/// Failures are already logged by the library, so the error itself is dropped.
fn load_folder(translator: &mut Translator, folder: &str, default_lang: &str) -> bool {
    translator
        .load_translations_from_folder(folder, default_lang)
        .is_ok()
}
