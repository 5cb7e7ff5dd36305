use std::fs;
use std::time::Duration;

use pushkind_planning::models::config::DashboardConfig;
use tempfile::TempDir;

fn config_dir(default: &str, profile: Option<(&str, &str)>) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("default.yaml"), default).unwrap();
    if let Some((name, content)) = profile {
        fs::write(dir.path().join(format!("{name}.yaml")), content).unwrap();
    }
    dir
}

#[test]
fn defaults_fill_optional_settings() {
    let dir = config_dir(
        "api_base_url: \"http://api.test\"\njwt_secret: \"secret\"\n",
        None,
    );

    let config = DashboardConfig::load_from(dir.path(), "local").unwrap();

    assert_eq!(config.api_base_url, "http://api.test");
    assert_eq!(config.page_size, 10);
    assert_eq!(config.request_timeout(), Duration::from_secs(15));
    assert_eq!(config.search_debounce(), Duration::from_millis(300));
    assert_eq!(config.sign_in_url, "/auth/signin");
    assert_eq!(config.dashboard_url, "/dashboard");
}

#[test]
fn profile_overrides_default() {
    let dir = config_dir(
        "api_base_url: \"http://api.test\"\njwt_secret: \"secret\"\npage_size: 10\n",
        Some((
            "production",
            "api_base_url: \"https://planning.univ.fr/api\"\nsearch_debounce_ms: 500\n",
        )),
    );

    let config = DashboardConfig::load_from(dir.path(), "production").unwrap();

    assert_eq!(config.api_base_url, "https://planning.univ.fr/api");
    assert_eq!(config.search_debounce(), Duration::from_millis(500));
    assert_eq!(config.jwt_secret, "secret");
}

#[test]
fn missing_default_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(DashboardConfig::load_from(dir.path(), "local").is_err());
}
