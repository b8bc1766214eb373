use super::{ensure_parent_dir, exit_codes};
use crate::cli::args::{HistoryArgs, HistorySub};
use symcheck_core::config::AppConfig;
use symcheck_core::report::console::{render_history_table, render_record};
use symcheck_core::storage::Store;

pub fn run(args: HistoryArgs, cfg: &AppConfig) -> anyhow::Result<i32> {
    ensure_parent_dir(&cfg.db_path)?;
    let store = Store::initialize(&cfg.db_path)?;

    match args.cmd {
        HistorySub::List { limit } => {
            let records = store.list_recent(limit.unwrap_or(cfg.history_limit))?;
            print!("{}", render_history_table(&records, store.count()?));
            Ok(exit_codes::OK)
        }
        HistorySub::Show { id } => match store.find_by_id(id)? {
            Some(record) => {
                print!("{}", render_record(&record));
                Ok(exit_codes::OK)
            }
            None => {
                eprintln!("no history entry with id {}", id);
                Ok(exit_codes::RUNTIME_ERROR)
            }
        },
    }
}

pub fn init_db(cfg: &AppConfig) -> anyhow::Result<i32> {
    ensure_parent_dir(&cfg.db_path)?;
    let store = Store::initialize(&cfg.db_path)?;
    eprintln!(
        "DB initialized: {} ({} records kept)",
        cfg.db_path.display(),
        store.count()?
    );
    Ok(exit_codes::OK)
}
