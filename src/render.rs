//! Plain-text rendering for advice segments and catalog records.
//!
//! Narrative segments print as-is (their newlines are the visual breaks);
//! code segments are set off between rules and left unindented so they can
//! be copied verbatim into a PowerShell or CMD window.

use crate::catalog::{DebloatItem, EssentialApp, FixItem};
use crate::segment::{segment, Segment};

const RULE_WIDTH: usize = 60;

/// Render one advice text with narrative and code blocks differentiated.
pub fn render_advice(raw: &str) -> String {
    let mut out = String::new();
    for piece in segment(raw) {
        match piece {
            Segment::Narrative(text) => {
                if !text.is_empty() {
                    out.push_str(&text);
                }
            }
            Segment::Code(text) => {
                append_code_block(&mut out, &text);
            }
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn append_code_block(out: &mut String, code: &str) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&rule_with_label("command"));
    let trimmed = code.trim_matches('\n');
    out.push_str(trimmed);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

fn rule_with_label(label: &str) -> String {
    let head = format!("----- {label} ");
    let tail = RULE_WIDTH.saturating_sub(head.len());
    format!("{head}{}\n", "-".repeat(tail))
}

/// One debloat record, with its advisory command as a code block.
pub fn render_debloat_item(item: &DebloatItem) -> String {
    let mut out = format!(
        "[{}] {}  ({} impact, {})\n  {}\n",
        item.id, item.title, item.impact, item.category, item.description
    );
    if let Some(command) = item.command {
        append_code_block(&mut out, command);
    }
    out
}

pub fn render_app(app: &EssentialApp) -> String {
    let mut out = format!(
        "{}  [{}]\n  {}\n  {}\n",
        app.name, app.category, app.description, app.url
    );
    append_code_block(&mut out, app.winget);
    out
}

pub fn render_fix(fix: &FixItem) -> String {
    let mut out = format!(
        "{}\n  {}\n  The Fix: {}\n",
        fix.title, fix.description, fix.solution
    );
    if let Some(code) = fix.code {
        append_code_block(&mut out, code);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn narrative_only_passes_through() {
        assert_eq!(render_advice("Reboot first."), "Reboot first.\n");
    }

    #[test]
    fn code_block_is_fenced_by_rules() {
        let rendered = render_advice("Run this:\n```powershell\nGet-Item\n```\nDone.");
        assert!(rendered.contains("----- command "));
        assert!(rendered.contains("\nGet-Item\n"));
        // The language tag is stripped before display.
        assert!(!rendered.contains("powershell"));
        assert!(rendered.ends_with("Done.\n"));
    }

    #[test]
    fn command_lines_are_unindented() {
        let rendered = render_advice("```\ndism.exe /online /Cleanup-Image\n```");
        assert!(rendered.contains("\ndism.exe /online /Cleanup-Image\n"));
    }

    #[test]
    fn debloat_item_includes_command_block() {
        let item = catalog::find_debloat("storage-3").unwrap();
        let rendered = render_debloat_item(item);
        assert!(rendered.contains("Disable Hibernation"));
        assert!(rendered.contains("powercfg -h off"));
        assert!(rendered.contains("high impact"));
    }

    #[test]
    fn fix_without_code_has_no_rule() {
        let fix = FixItem {
            title: "T",
            description: "D",
            solution: "S",
            code: None,
        };
        assert!(!render_fix(&fix).contains("----- command "));
    }
}
