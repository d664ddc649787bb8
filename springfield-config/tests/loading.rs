//! Integration tests for layered configuration loading

use springfield_config::*;
use std::io::Write;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_toml_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "l10n.toml",
        r#"
        default_language = "en-US"
        prod_languages = ["en-US", "en-GB", "fr", "es-ES"]
        supported_locale_ignore = ["/all-urls.xml"]

        [canonical_locales]
        en = "en-US"
        es = "es-ES"
        "#,
    );

    let manager = ConfigManager::new();
    manager.load_file(&path).unwrap();
    let settings: L10nSettings = manager.load_validated().unwrap();

    assert_eq!(settings.prod_languages, vec!["en-US", "en-GB", "fr", "es-ES"]);
    assert_eq!(settings.supported_locale_ignore, vec!["/all-urls.xml"]);
    assert!(settings.supported_nonlocales.contains(&"robots.txt".to_string()));
}

#[test]
fn test_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "l10n.json",
        r#"{"prod_languages": ["en-US", "de"], "canonical_locales": {"en": "en-US"}}"#,
    );

    let manager = ConfigManager::new();
    manager.load_file(&path).unwrap();
    let settings: L10nSettings = manager.load_validated().unwrap();
    assert_eq!(settings.canonical_locales.len(), 1);
}

#[test]
fn test_dotenv_file_with_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        ".env",
        "SPRINGFIELD_L10N_PROD_LANGUAGES=en-US,fr\n\
         SPRINGFIELD_L10N_CANONICAL_LOCALES=en=en-US\n\
         UNRELATED=1\n",
    );

    let manager = ConfigManager::with_prefix(L10N_ENV_PREFIX);
    manager.load_dotenv(&path).unwrap();

    assert!(!manager.has("unrelated"));
    let settings: L10nSettings = manager.load_validated().unwrap();
    assert_eq!(settings.prod_languages, vec!["en-US", "fr"]);
}

#[test]
fn test_later_source_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(&dir, "a.json", r#"{"prod_languages": ["en-US"], "canonical_locales": {}}"#);
    let second = write_file(&dir, "b.toml", r#"prod_languages = ["en-US", "fr"]"#);

    let manager = ConfigManager::new();
    manager.load_file(&first).unwrap().load_file(&second).unwrap();

    let langs: Vec<String> = manager.get("prod_languages").unwrap();
    assert_eq!(langs, vec!["en-US", "fr"]);
}

#[test]
fn test_missing_file_is_load_error() {
    let manager = ConfigManager::new();
    let result = manager.load_file("/nonexistent/springfield/l10n.toml");
    assert!(matches!(result, Err(ConfigError::Load { .. })));
}

#[test]
fn test_prefixed_env_file_through_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        ".env",
        "SPRINGFIELD_L10N_PROD_LANGUAGES=\"en-US,fr\" # served set\n\
         SPRINGFIELD_L10N_CANONICAL_LOCALES=en=en-US\n\
         PROD_LANGUAGES=de\n",
    );

    let manager = ConfigManager::with_prefix(L10N_ENV_PREFIX);
    manager.load_file(&path).unwrap();

    let settings: L10nSettings = manager.load_validated().unwrap();
    assert_eq!(settings.prod_languages, vec!["en-US", "fr"]);
}

#[test]
fn test_layered_dotenv_overrides_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(
        &dir,
        "l10n.toml",
        r#"
        default_language = "en-US"
        prod_languages = ["en-US", "fr", "de"]
        canonical_locales = { en = "en-US" }
        "#,
    );
    let dotenv = write_file(&dir, "springfield.env", "SPRINGFIELD_L10N_DEFAULT_LANGUAGE=de\n");

    let manager = ConfigManager::with_prefix(L10N_ENV_PREFIX);
    manager
        .load_layered(Some(file.as_path()), Some(dotenv.as_path()))
        .unwrap();

    let settings: L10nSettings = manager.load_validated().unwrap();
    assert_eq!(settings.default_language, "de");
    assert_eq!(settings.prod_languages, vec!["en-US", "fr", "de"]);
}
