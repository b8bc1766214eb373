use super::args::{Cli, Command, GlobalArgs};
use std::path::Path;
use symcheck_core::config::{self, AppConfig};
use symcheck_core::ConfigError;

pub mod analyze;
pub mod export;
pub mod history;
pub mod info;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const RUNTIME_ERROR: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

/// Defaults, then the YAML file, then SYMCHECK_* environment, then flags.
pub fn load_app_config(global: &GlobalArgs) -> Result<AppConfig, ConfigError> {
    let mut cfg = AppConfig::default();
    let file = match &global.config {
        Some(path) => Some(config::load_required(path)?),
        None => config::load_file(Path::new(config::DEFAULT_CONFIG_PATH))?,
    };
    if let Some(file) = file {
        cfg.apply_file(file)?;
    }
    cfg.apply_env()?;
    if let Some(db) = &global.db {
        cfg.db_path = db.clone();
    }
    Ok(cfg)
}

pub async fn dispatch(cli: Cli, cfg: AppConfig) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Analyze(args) => analyze::run(args, cfg).await,
        Command::History(args) => history::run(args, &cfg),
        Command::Export(args) => export::run(args, &cfg),
        Command::InitDb => history::init_db(&cfg),
        Command::Models => info::models(&cfg),
        Command::Safety => info::safety(),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
