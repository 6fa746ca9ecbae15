//! Binary integration tests for CLI commands
//!
//! These tests run the actual agent-picker binary against a temporary store.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn picker_bin(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agent-picker"));
    cmd.arg("--store")
        .arg(dir.join("selection.json"))
        .arg("--config")
        .arg(dir.join("config.json"))
        .env_remove("AGENT_PICKER_STORE")
        .env_remove("DEBUG");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Result<Output, Box<dyn std::error::Error>> {
    Ok(picker_bin(dir).args(args).output()?)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = run(temp_dir.path(), &["--help"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Pick the research agent"));
    Ok(())
}

#[test]
fn test_cli_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = run(temp_dir.path(), &["--version"])?;
    assert!(output.status.success());
    Ok(())
}

#[test]
fn test_cli_current_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = run(temp_dir.path(), &["current"])?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "research_agent_full\tFull Research System"
    );
    Ok(())
}

#[test]
fn test_cli_select_persists() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let output = run(temp_dir.path(), &["select", "scope_research"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Agent set to Scope Research"));

    let output = run(temp_dir.path(), &["current"])?;
    assert_eq!(stdout(&output).trim(), "scope_research\tScope Research");

    let raw = std::fs::read_to_string(temp_dir.path().join("selection.json"))?;
    assert!(raw.contains("\"deep-researcher-selected-agent\": \"scope_research\""));
    Ok(())
}

#[test]
fn test_cli_select_unknown_id_is_echoed() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let output = run(temp_dir.path(), &["select", "nonexistent_id"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Agent set to nonexistent_id"));

    let output = run(temp_dir.path(), &["current"])?;
    assert_eq!(stdout(&output).trim(), "nonexistent_id\tnonexistent_id");
    Ok(())
}

#[test]
fn test_cli_select_unknown_id_strict_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("config.json"), r#"{"policy": "strict"}"#)?;

    let output = run(temp_dir.path(), &["select", "nonexistent_id"])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown agent id"));
    assert!(!temp_dir.path().join("selection.json").exists());
    Ok(())
}

#[test]
fn test_cli_select_repairs_corrupt_store() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("selection.json"), "{ broken")?;

    let output = run(temp_dir.path(), &["select", "scope_research"])?;
    assert!(output.status.success());

    let output = run(temp_dir.path(), &["current"])?;
    assert_eq!(stdout(&output).trim(), "scope_research\tScope Research");
    assert!(temp_dir.path().join("selection.json.corrupt").exists());
    Ok(())
}

#[test]
fn test_cli_select_unwritable_store_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    std::fs::create_dir(temp_dir.path().join("selection.json"))?;

    let output = run(temp_dir.path(), &["select", "scope_research"])?;

    assert!(!output.status.success());
    assert!(!stdout(&output).contains("Agent set to"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to save agent selection"));
    Ok(())
}

#[test]
fn test_cli_reset_unwritable_store_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    std::fs::create_dir(temp_dir.path().join("selection.json"))?;

    let output = run(temp_dir.path(), &["reset"])?;

    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_cli_ephemeral_select_leaves_no_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let output = run(temp_dir.path(), &["--ephemeral", "select", "research_agent_mcp"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Agent set to Research Agent (MCP)"));
    assert!(!temp_dir.path().join("selection.json").exists());

    let output = run(temp_dir.path(), &["current"])?;
    assert!(stdout(&output).starts_with("research_agent_full\t"));
    Ok(())
}

#[test]
fn test_cli_ephemeral_ignores_saved_selection() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    run(temp_dir.path(), &["select", "scope_research"])?;

    let output = run(temp_dir.path(), &["current", "--ephemeral"])?;
    assert!(stdout(&output).starts_with("research_agent_full\t"));
    Ok(())
}

#[test]
fn test_cli_reset() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    run(temp_dir.path(), &["select", "research_agent"])?;

    let output = run(temp_dir.path(), &["reset"])?;
    assert!(output.status.success());

    let output = run(temp_dir.path(), &["current"])?;
    assert!(stdout(&output).starts_with("research_agent_full\t"));
    Ok(())
}

#[test]
fn test_cli_list_marks_current() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    run(temp_dir.path(), &["select", "research_agent_mcp"])?;

    let output = run(temp_dir.path(), &["list"])?;
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("  research_agent_full"));
    assert!(lines[3].starts_with("* research_agent_mcp"));
    Ok(())
}

#[test]
fn test_cli_list_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = run(temp_dir.path(), &["list", "--json"])?;
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entries = entries.as_array().ok_or("expected array")?;
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["id"], "research_agent_full");
    assert_eq!(entries[0]["current"], true);
    assert_eq!(entries[1]["current"], false);
    Ok(())
}

#[test]
fn test_cli_name() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let output = run(temp_dir.path(), &["name", "research_agent_supervisor"])?;
    assert_eq!(stdout(&output).trim(), "Multi-Agent Supervisor");

    let output = run(temp_dir.path(), &["name", "mystery"])?;
    assert_eq!(stdout(&output).trim(), "mystery");
    Ok(())
}

#[test]
fn test_cli_config_show_and_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;

    let output = run(temp_dir.path(), &["config"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("deep-researcher-selected-agent"));

    let output = run(temp_dir.path(), &["config", "--path"])?;
    assert!(stdout(&output).contains("config.json"));
    Ok(())
}

#[test]
fn test_cli_invalid_argument_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = run(temp_dir.path(), &["--invalid-flag"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
    assert!(stdout(&output).contains("Usage:"));
    Ok(())
}
