use super::{ensure_parent_dir, exit_codes};
use crate::cli::args::ExportArgs;
use anyhow::Context;
use symcheck_core::config::AppConfig;
use symcheck_core::storage::Store;

pub fn run(args: ExportArgs, cfg: &AppConfig) -> anyhow::Result<i32> {
    ensure_parent_dir(&cfg.db_path)?;
    let store = Store::initialize(&cfg.db_path)?;

    let summary = store
        .export_records(&args.out, args.limit)
        .with_context(|| format!("failed to export history to {}", args.out.display()))?;

    eprintln!(
        "exported {} rows ({} bytes) to {}",
        summary.rows,
        summary.bytes,
        args.out.display()
    );
    Ok(exit_codes::OK)
}
