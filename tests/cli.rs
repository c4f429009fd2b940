//! Integration tests for the offline subcommands (catalog listing and
//! advice-text rendering). Advice subcommands need a network backend and are
//! covered by unit tests against a scripted model instead.

use std::io::Write;
use std::process::{Command, Output};

fn winbuster(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_winbuster"))
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("run winbuster")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse JSON output")
}

#[test]
fn debloat_json_filters_by_os() {
    let output = winbuster(&["debloat", "--os", "win10", "--json"]);
    let items = stdout_json(&output);
    let items = items.as_array().expect("array");
    assert_eq!(items.len(), 9);

    let ids: Vec<&str> = items
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"1"), "Cortana is a win10 item");
    assert!(!ids.contains(&"2"), "Copilot is win11-only");
    for item in items {
        let applies = item["applies_to"].as_str().unwrap();
        assert!(applies == "win10" || applies == "both");
    }
}

#[test]
fn debloat_json_category_filter() {
    let output = winbuster(&["debloat", "--json", "--category", "privacy"]);
    let items = stdout_json(&output);
    let items = items.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "4");
}

#[test]
fn apps_and_fixes_json_counts() {
    let apps = stdout_json(&winbuster(&["apps", "--json"]));
    assert_eq!(apps.as_array().unwrap().len(), 6);

    let fixes = stdout_json(&winbuster(&["fixes", "--json"]));
    assert_eq!(fixes.as_array().unwrap().len(), 3);
    assert!(fixes[0]["code"].as_str().unwrap().starts_with("reg add"));
}

#[test]
fn debloat_listing_prints_commands() {
    let output = winbuster(&["debloat", "--os", "win11"]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Windows Copilot"));
    assert!(text.contains("powercfg -h off"));
    assert!(!text.contains("Cortana Assistant"));
}

#[test]
fn ask_rejects_whitespace_query() {
    let output = winbuster(&["ask", "   "]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("query is empty"), "stderr: {stderr}");
}

#[test]
fn troubleshoot_rejects_empty_problem() {
    let output = winbuster(&["troubleshoot", ""]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("problem description is empty"), "stderr: {stderr}");
}

#[test]
fn explain_unknown_id_lists_valid_ids() {
    let output = winbuster(&["explain", "definitely-not-an-id"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown catalog item"), "stderr: {stderr}");
    assert!(stderr.contains("storage-1"), "stderr: {stderr}");
}

#[test]
fn render_sets_off_fenced_blocks() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "Free up space:\n```powershell\nGet-ChildItem\n```\nThat is all."
    )
    .expect("write advice");

    let output = winbuster(&["render", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Free up space:"));
    assert!(text.contains("----- command "));
    assert!(text.contains("\nGet-ChildItem\n"));
    assert!(!text.contains("powershell"), "language tag should be stripped");
    assert!(text.contains("That is all."));
}

#[test]
fn render_passes_plain_text_through() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "No fences here.").expect("write advice");

    let output = winbuster(&["render", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "No fences here.\n"
    );
}
