//! CLI argument parsing for the winbuster advisory commands.
//!
//! The CLI is intentionally thin: each subcommand maps to one catalog view
//! or one advisory intent, with no policy beyond argument validation.
use crate::catalog::{Category, WindowsVersion};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "winbuster",
    version,
    about = "Windows debloat advisor: static optimization catalog plus Gemini-backed advice",
    after_help = "Examples:\n  winbuster debloat --os win10\n  winbuster explain xbox\n  winbuster ask \"I have a 64GB SSD, how do I reclaim space?\"\n  winbuster storage --context \"C: drive is red\"\n  winbuster troubleshoot \"taskbar frozen after update\"\n  winbuster render saved-advice.md\n  winbuster tui\n\nAdvice commands need GEMINI_API_KEY (or ~/.config/winbuster/api_key).",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List debloat actions for the targeted Windows release
    Debloat(DebloatArgs),
    /// List recommended open-source replacement apps
    Apps(ListArgs),
    /// List quick manual fixes
    Fixes(ListArgs),
    /// Ask for a trade-off analysis of one catalog item
    Explain(ExplainArgs),
    /// Ask for a free-form optimization plan
    Ask(AskArgs),
    /// Ask for a storage-reclamation audit
    Storage(StorageArgs),
    /// Troubleshoot a described problem
    Troubleshoot(TroubleshootArgs),
    /// Segment and pretty-print a saved advice text
    Render(RenderArgs),
    /// Interactive full-screen shell
    Tui(TuiArgs),
}

#[derive(Parser, Debug)]
#[command(about = "List debloat actions applicable to a Windows release")]
pub struct DebloatArgs {
    /// Targeted Windows release
    #[arg(long, value_enum, default_value = "win11")]
    pub os: WindowsVersion,

    /// Only show items in this category
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Explain one catalog item's bloat vs. necessity trade-offs")]
pub struct ExplainArgs {
    /// Catalog item identifier (see `winbuster debloat`)
    pub item_id: String,

    /// Targeted Windows release
    #[arg(long, value_enum, default_value = "win11")]
    pub os: WindowsVersion,
}

#[derive(Parser, Debug)]
#[command(about = "Build a custom optimization plan from a free-text query")]
pub struct AskArgs {
    /// What to optimize (system specs, symptoms, goals)
    pub query: String,

    /// Targeted Windows release
    #[arg(long, value_enum, default_value = "win11")]
    pub os: WindowsVersion,
}

#[derive(Parser, Debug)]
#[command(about = "Run a storage-reclamation audit")]
pub struct StorageArgs {
    /// Optional description of the disk situation
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Targeted Windows release
    #[arg(long, value_enum, default_value = "win11")]
    pub os: WindowsVersion,
}

#[derive(Parser, Debug)]
#[command(about = "Diagnose a described Windows problem")]
pub struct TroubleshootArgs {
    /// The problem, in your own words
    pub problem: String,

    /// Targeted Windows release
    #[arg(long, value_enum, default_value = "win11")]
    pub os: WindowsVersion,
}

#[derive(Parser, Debug)]
#[command(about = "Render an advice text (file or stdin) with code blocks set off")]
pub struct RenderArgs {
    /// File containing the advice text; stdin when omitted
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Interactive tabbed shell over catalog and advice sections")]
pub struct TuiArgs {
    /// Targeted Windows release at startup
    #[arg(long, value_enum, default_value = "win11")]
    pub os: WindowsVersion,

    /// Start with advice features disabled (catalog sections only)
    #[arg(long)]
    pub no_advice: bool,
}
