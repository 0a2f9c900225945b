//! Render command: runs one render cycle and fires the given hooks.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use hookblocks_core::error::AppError;
use hookblocks_core::types::request::RequestKind;
use hookblocks_registry::RenderCycle;
use hookblocks_registry::fanout::FanoutReport;
use hookblocks_registry::hooks::DispatchResult;
use hookblocks_service::AppContext;

use crate::output::{self, OutputFormat};

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Hooks to fire, in order
    #[arg(required = true)]
    pub hooks: Vec<String>,

    /// Kind of request to simulate: content, admin, or api
    #[arg(short, long, default_value_t = RequestKind::Content)]
    pub kind: RequestKind,
}

/// JSON shape of one render
#[derive(Debug, Serialize)]
struct RenderOutput {
    kind: RequestKind,
    fanout: FanoutReport,
    hooks: Vec<DispatchResult>,
}

/// Execute the render command
pub async fn execute(
    args: &RenderArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let cycle = RenderCycle::new(args.kind, Arc::clone(&ctx.pipeline));
    let report = cycle.begin(&ctx.fanout).await;

    let mut hooks = Vec::with_capacity(args.hooks.len());
    for hook in &args.hooks {
        hooks.push(cycle.fire(hook).await);
    }

    match format {
        OutputFormat::Json => output::print_json(&RenderOutput {
            kind: args.kind,
            fanout: report,
            hooks,
        }),
        OutputFormat::Table => {
            if report.skipped {
                output::print_warning(&format!("{} requests do not render blocks", args.kind));
            }
            if report.store_unavailable {
                output::print_warning("Record store unavailable; rendered without blocks");
            }
            if !report.failed.is_empty() {
                output::print_warning(&format!(
                    "{} record(s) could not be registered",
                    report.failed.len()
                ));
            }
            for result in &hooks {
                println!("<!-- {} ({} block(s)) -->", result.hook_name, result.blocks.len());
                let html = result.output();
                if !html.is_empty() {
                    println!("{html}");
                }
            }
        }
    }

    Ok(())
}
