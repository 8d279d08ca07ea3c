use flujos::config::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_settings_from_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("flujos.toml");

    let flujos_toml = r#"
[api]
base_url = "https://flows.example.com"
login_path = "/ingresar"
timeout_seconds = 15

[ui]
port = 9090
dist_dir = "/srv/flujos"
"#;
    fs::write(&path, flujos_toml)?;

    let settings = Settings::from_file(&path)?;
    assert_eq!(settings.api.base_url, "https://flows.example.com");
    assert_eq!(settings.api.login_url(), "https://flows.example.com/ingresar");
    assert_eq!(settings.api.timeout_seconds, Some(15));
    assert_eq!(settings.ui.port, 9090);
    assert_eq!(settings.ui.dist_dir, PathBuf::from("/srv/flujos"));
    // unset keys keep their defaults
    assert_eq!(settings.ui.host, "127.0.0.1");

    Ok(())
}

#[test]
fn test_missing_file_falls_back_to_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = Settings::from_file(&temp_dir.path().join("absent.toml"))?;

    assert_eq!(settings.api.base_url, "http://localhost:8000");
    assert_eq!(settings.ui.port, 8080);

    Ok(())
}

#[test]
fn test_printed_config_loads_back() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("flujos.toml");

    let mut settings = Settings::default();
    settings.api.base_url = "http://api.internal:7000".to_string();
    settings.ui.port = 3000;
    fs::write(&path, settings.to_toml()?)?;

    let loaded = Settings::from_file(&path)?;
    assert_eq!(loaded.api.base_url, "http://api.internal:7000");
    assert_eq!(loaded.ui.port, 3000);

    Ok(())
}
