use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::LoadArgs;
use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestExecutor};
use crate::runner::{LoadPlan, run_load_test};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["uriload.toml", "uriload.json"];

/// Parses arguments, loads config, validates the plan, and drives the run.
///
/// # Errors
///
/// Returns an error when argument or config validation fails, the
/// runtime cannot start, or the run itself fails.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose);

    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, &matches, &config)?;
    }

    let plan = LoadPlan::new(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&plan))
}

fn parse_args() -> AppResult<Option<(LoadArgs, ArgMatches)>> {
    let mut cmd = LoadArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(plan: &LoadPlan) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let executor: Arc<dyn RequestExecutor> = Arc::new(HttpExecutor::new(plan)?);
    let report = run_load_test(plan, &executor, &shutdown_tx).await?;

    drop(shutdown_tx.send(()));
    signal_handle.await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
