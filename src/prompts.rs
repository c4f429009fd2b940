//! Prompt assembly for the four advisory intents.
//!
//! The fixed role/style directives live under `prompts/` and are compiled in,
//! so the shipped binary carries no loose template files. Builders produce
//! the user-facing prompt strings; the catalog's short OS tag (`win10`,
//! `win11`) is what the prompts embed.

use crate::catalog::WindowsVersion;

pub const EXPLAIN_SYSTEM_PROMPT: &str = include_str!("../prompts/explain_system.md");
pub const TROUBLESHOOT_SYSTEM_PROMPT: &str = include_str!("../prompts/troubleshoot_system.md");
pub const STORAGE_SYSTEM_PROMPT: &str = include_str!("../prompts/storage_system.md");
pub const OPTIMIZE_SYSTEM_PROMPT: &str = include_str!("../prompts/optimize_system.md");

pub const EXPLAIN_TEMPERATURE: f64 = 0.3;
pub const TROUBLESHOOT_TEMPERATURE: f64 = 0.6;
pub const STORAGE_TEMPERATURE: f64 = 0.7;
pub const OPTIMIZE_TEMPERATURE: f64 = 0.7;

/// Per-item trade-off analysis prompt.
pub fn explain_prompt(title: &str, description: &str, version: WindowsVersion) -> String {
    format!(
        "Analyze '{title}' on Windows {}.\nContext: {description}",
        version.tag()
    )
}

/// Free-form troubleshooting prompt.
pub fn troubleshoot_prompt(problem: &str, version: WindowsVersion) -> String {
    format!("Troubleshoot this Windows {} problem: {problem}", version.tag())
}

/// Storage-reclamation audit prompt with optional user context.
pub fn storage_prompt(version: WindowsVersion, user_details: Option<&str>) -> String {
    let mut prompt = format!(
        "Provide a masterclass on reclaiming storage on Windows {}.",
        version.tag()
    );
    if let Some(details) = user_details {
        if !details.trim().is_empty() {
            prompt.push_str(&format!(" User Context: {details}"));
        }
    }
    prompt
}

/// Optimization-plan prompt from a free-text query.
pub fn optimize_prompt(query: &str, version: WindowsVersion) -> String {
    format!("I am using Windows {}. {query}", version.tag())
}
