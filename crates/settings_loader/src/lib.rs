//! # Settings Loader
//!
//! Loads the loyalty API configuration from a JSON settings file. The file
//! carries the workbook location, the shared API token, the two sheet names,
//! and the extractor knobs (`min_document_digits`, `include_extended_fields`).
//!
//! The path comes from the `SETTINGS_PATH` environment variable when set,
//! falling back to `settings.json` in the working directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use models::Settings;

/// Loads and validates settings from a JSON file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;

    ensure!(
        !settings.api_token.is_empty(),
        "api_token must not be empty in {}",
        path.display()
    );
    ensure!(
        !settings.workbook_path.is_empty(),
        "workbook_path must not be empty in {}",
        path.display()
    );

    Ok(settings)
}

/// Resolves the settings path from SETTINGS_PATH, defaulting to
/// ./settings.json.
pub fn settings_path_from_env() -> PathBuf {
    env::var("SETTINGS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("settings.json"))
}

/// Checks whether a settings file exists at the given path.
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("loyalty-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_a_complete_file() {
        let path = write_temp(
            "full.json",
            r#"{
                "settings_version": 1,
                "workbook_path": "data/fidelidade.xlsx",
                "api_token": "secreto",
                "primary_sheet_name": "Clientes",
                "expired_sheet_name": "Expirados",
                "min_document_digits": 10,
                "include_extended_fields": true
            }"#,
        );
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.primary_sheet_name, "Clientes");
        assert_eq!(settings.min_document_digits, 10);
        assert!(settings.include_extended_fields);
        fs::remove_file(path).ok();
    }

    #[test]
    fn optional_fields_take_defaults() {
        let path = write_temp(
            "minimal.json",
            r#"{
                "settings_version": 1,
                "workbook_path": "data/fidelidade.xlsx",
                "api_token": "secreto",
                "expired_sheet_name": "Expirados"
            }"#,
        );
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.primary_sheet_name, "");
        assert_eq!(settings.min_document_digits, 8);
        assert!(!settings.include_extended_fields);
        fs::remove_file(path).ok();
    }

    #[test]
    fn empty_token_is_rejected() {
        let path = write_temp(
            "notoken.json",
            r#"{
                "settings_version": 1,
                "workbook_path": "data/fidelidade.xlsx",
                "api_token": "",
                "expired_sheet_name": "Expirados"
            }"#,
        );
        assert!(load_settings(&path).is_err());
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_settings("does-not-exist.json").is_err());
        assert!(!settings_file_exists("does-not-exist.json"));
    }
}
