//! Integration tests for the configuration layers

use super::test_utils::{with_isolated_env, TestWorkspace};
use fixity::config::{ConfigLoader, FixityConfig, WORKSPACE_CONFIG_FILE};
use fixity::store::load_snapshot;
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_file() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    let config = with_isolated_env(&env_dir, || ConfigLoader::load(ws.root()).unwrap());
    assert_eq!(config.database.file_name, "checksums.json.gz");
    assert!(config.scan.show_progress);
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_xdg_config_home_is_used() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    let config = with_isolated_env(&env_dir, || {
        let global_dir = env_dir.path().join("config").join("fixity");
        std::fs::create_dir_all(&global_dir).unwrap();
        std::fs::write(
            global_dir.join("config.toml"),
            "[scan]\nexcluded_names = [\"Thumbs.db\"]\n",
        )
        .unwrap();
        assert_eq!(
            ConfigLoader::global_config_path(),
            Some(global_dir.join("config.toml"))
        );
        ConfigLoader::load(ws.root()).unwrap()
    });
    assert_eq!(config.scan.excluded_names, vec!["Thumbs.db".to_string()]);
}

#[test]
fn test_workspace_file_and_environment_precedence() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write(
        WORKSPACE_CONFIG_FILE,
        "[database]\nfile_name = \"local.json.gz\"\ncompression_level = 1\n",
    );
    let config = with_isolated_env(&env_dir, || {
        std::env::set_var("FIXITY__DATABASE__COMPRESSION_LEVEL", "8");
        ConfigLoader::load(ws.root()).unwrap()
    });
    assert_eq!(config.database.file_name, "local.json.gz");
    assert_eq!(config.database.compression_level, 8);
}

#[test]
fn test_custom_database_name_is_used_and_excluded() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    let mut config = FixityConfig::default();
    config.database.file_name = "integrity.db.gz".to_string();

    let svc = ws.service_with(config);
    svc.regenerate().unwrap();
    svc.regenerate().unwrap();

    let (store, _) = load_snapshot(ws.path("integrity.db.gz")).unwrap();
    assert_eq!(store.path_count(), 1);
    assert!(!ws.database().exists());
}

#[test]
fn test_excluded_names_are_not_tracked() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    ws.write("sub/.DS_Store", "junk");
    ws.write("fixity-backup.exe", "tool binary");
    let mut config = FixityConfig::default();
    config.scan.excluded_names = vec![".DS_Store".to_string()];

    let summary = ws.service_with(config).regenerate().unwrap();
    assert_eq!(summary.report.scanned, 1);
}

#[test]
fn test_invalid_workspace_config_is_rejected() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write(WORKSPACE_CONFIG_FILE, "[logging]\nformat = \"xml\"\n");
    let result = with_isolated_env(&env_dir, || ConfigLoader::load(ws.root()));
    assert!(result.is_err());
}
