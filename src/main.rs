use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::sync::Arc;

mod catalog;
mod cli;
mod gateway;
mod gemini;
mod prompts;
mod render;
mod segment;
mod shell;
mod tui;

use catalog::Category;
use cli::{
    AskArgs, Command, DebloatArgs, ExplainArgs, ListArgs, RenderArgs, RootArgs, StorageArgs,
    TroubleshootArgs, TuiArgs,
};
use gateway::AdviceGateway;
use gemini::GeminiClient;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = RootArgs::parse();
    match cli.command {
        Command::Debloat(args) => cmd_debloat(args),
        Command::Apps(args) => cmd_apps(args),
        Command::Fixes(args) => cmd_fixes(args),
        Command::Explain(args) => cmd_explain(args),
        Command::Ask(args) => cmd_ask(args),
        Command::Storage(args) => cmd_storage(args),
        Command::Troubleshoot(args) => cmd_troubleshoot(args),
        Command::Render(args) => cmd_render(args),
        Command::Tui(args) => cmd_tui(args),
    }
}

fn build_gateway() -> Result<AdviceGateway> {
    let client = GeminiClient::from_env().context("configure Gemini client")?;
    Ok(AdviceGateway::new(Box::new(client)))
}

fn cmd_debloat(args: DebloatArgs) -> Result<()> {
    let items: Vec<_> = catalog::debloat_for(args.os)
        .filter(|item| matches_category(item.category, args.category.as_ref()))
        .collect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    println!("Debloat actions for {} ({} items)\n", args.os, items.len());
    for item in items {
        println!("{}", render::render_debloat_item(item));
    }
    Ok(())
}

fn matches_category(category: Category, wanted: Option<&Category>) -> bool {
    wanted.is_none_or(|wanted| *wanted == category)
}

fn cmd_apps(args: ListArgs) -> Result<()> {
    let apps = catalog::essential_apps();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&apps)?);
        return Ok(());
    }
    println!("Open-source essentials ({} apps)\n", apps.len());
    for app in apps {
        println!("{}", render::render_app(app));
    }
    Ok(())
}

fn cmd_fixes(args: ListArgs) -> Result<()> {
    let fixes = catalog::quick_fixes();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&fixes)?);
        return Ok(());
    }
    println!("Quick fixes ({})\n", fixes.len());
    for fix in fixes {
        println!("{}", render::render_fix(fix));
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> Result<()> {
    let item = catalog::find_debloat(&args.item_id).ok_or_else(|| {
        let ids: Vec<_> = catalog::debloat_items().iter().map(|item| item.id).collect();
        anyhow!(
            "unknown catalog item '{}'; valid ids: {}",
            args.item_id,
            ids.join(", ")
        )
    })?;
    let gateway = build_gateway()?;
    println!("Analysis: {} on {}\n", item.title, args.os);
    let advice = gateway.explain_bloatware(item.title, item.description, args.os);
    print!("{}", render::render_advice(&advice));
    Ok(())
}

fn cmd_ask(args: AskArgs) -> Result<()> {
    if args.query.trim().is_empty() {
        bail!("query is empty; describe what you want to optimize");
    }
    let gateway = build_gateway()?;
    let advice = gateway.optimization_advice(&args.query, args.os);
    print!("{}", render::render_advice(&advice));
    Ok(())
}

fn cmd_storage(args: StorageArgs) -> Result<()> {
    let gateway = build_gateway()?;
    let advice = gateway.storage_audit(args.os, args.context.as_deref());
    print!("{}", render::render_advice(&advice));
    Ok(())
}

fn cmd_troubleshoot(args: TroubleshootArgs) -> Result<()> {
    if args.problem.trim().is_empty() {
        bail!("problem description is empty");
    }
    let gateway = build_gateway()?;
    let advice = gateway.troubleshoot(&args.problem, args.os);
    print!("{}", render::render_advice(&advice));
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let raw = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read advice text from stdin")?;
            buffer
        }
    };
    print!("{}", render::render_advice(&raw));
    Ok(())
}

fn cmd_tui(args: TuiArgs) -> Result<()> {
    let gateway = match build_gateway() {
        Ok(gateway) => Some(Arc::new(gateway)),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "advice features unavailable");
            None
        }
    };
    let advice_enabled = !args.no_advice && gateway.is_some();
    tui::run(gateway, args.os, advice_enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_defaults_to_all() {
        assert!(matches_category(Category::Apps, None));
        assert!(matches_category(Category::Apps, Some(&Category::Apps)));
        assert!(!matches_category(Category::Apps, Some(&Category::Privacy)));
    }
}
