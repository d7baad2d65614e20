// tests/config_test.rs
use git_changelog::config::{load_config, Config};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.output_file, "CHANGELOG.md");
    assert_eq!(config.repo_url, None);
    assert!(config.group_by_type);
    assert!(config.include_unreleased);
    assert!(config.include_other);
    assert_eq!(config.latest_version, None);
    assert!(config.append);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
output_file = "docs/CHANGES.md"
repo_url = "https://github.com/acme/widget"
group_by_type = true
include_unreleased = false
append = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.output_file, "docs/CHANGES.md");
    assert_eq!(
        config.repo_url.as_deref(),
        Some("https://github.com/acme/widget")
    );
    assert!(!config.include_unreleased);
    assert!(!config.append);
}

#[test]
fn test_load_missing_explicit_file_is_error() {
    let result = load_config(Some("/nonexistent/changelog.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"output_file = [not valid").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("changelog.toml"),
        "latest_version = \"2.0.0\"\n",
    )
    .unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.latest_version.as_deref(), Some("2.0.0"));
}

#[test]
#[serial]
fn test_defaults_when_no_file_anywhere() {
    let dir = tempfile::tempdir().unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(original_dir).unwrap();

    // Either defaults, or the user config dir happens to carry a file;
    // in a clean environment this is the default configuration
    let config = result.unwrap();
    assert_eq!(config.output_file, "CHANGELOG.md");
}
