//! Command routing through RunContext

use super::test_utils::{with_isolated_env, TestWorkspace};
use fixity::cli::{Commands, OutputFormat, RunContext, EXIT_CHANGES_DETECTED};
use fixity::config::FixityConfig;
use fixity::error::ApiError;
use tempfile::TempDir;

fn context(ws: &TestWorkspace) -> RunContext {
    RunContext::with_config(ws.root().to_path_buf(), FixityConfig::default()).quiet(true)
}

fn verify(format: OutputFormat, fail_on_change: bool) -> Commands {
    Commands::Verify {
        format,
        show_ok: true,
        fail_on_change,
    }
}

#[test]
fn test_regenerate_then_verify_text() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    ws.write("b.txt", "beta");
    let ctx = context(&ws);

    let out = ctx
        .execute(&Commands::Regenerate {
            format: OutputFormat::Text,
        })
        .unwrap();
    assert!(out.text.contains("CHECKSUM REGENERATION COMPLETE"));

    let out = ctx.execute(&verify(OutputFormat::Text, true)).unwrap();
    assert_eq!(out.exit_code, 0);
    assert!(out.text.contains("✓ OK (2):"));
    assert!(out.text.contains("All files are verified"));
}

#[test]
fn test_verify_json_reports_changes() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    let ctx = context(&ws);
    ctx.execute(&Commands::Add {
        format: OutputFormat::Json,
    })
    .unwrap();

    ws.rename("a.txt", "renamed.txt");
    ws.write("new.txt", "new");
    let out = ctx.execute(&verify(OutputFormat::Json, true)).unwrap();
    assert_eq!(out.exit_code, EXIT_CHANGES_DETECTED);

    let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
    assert_eq!(value["counts"]["RENAMED"], 1);
    assert_eq!(value["counts"]["NEW"], 1);
    assert_eq!(value["results"]["renamed"][0]["new_paths"][0], "renamed.txt");
}

#[test]
fn test_verify_without_database_fails() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    let err = context(&ws)
        .execute(&verify(OutputFormat::Text, false))
        .unwrap_err();
    assert!(matches!(err, ApiError::DatabaseMissing(_)));
}

#[test]
fn test_run_context_loads_workspace_config() {
    let env_dir = TempDir::new().unwrap();
    let ws = TestWorkspace::new();
    ws.write(".fixity.toml", "[database]\nfile_name = \"custom.json.gz\"\n");
    ws.write("a.txt", "alpha");

    let ctx = with_isolated_env(&env_dir, || {
        RunContext::new(ws.root().to_path_buf(), None).unwrap()
    })
    .quiet(true);
    assert_eq!(ctx.config().database.file_name, "custom.json.gz");

    ctx.execute(&Commands::Regenerate {
        format: OutputFormat::Text,
    })
    .unwrap();
    assert!(ws.path("custom.json.gz").exists());
}
