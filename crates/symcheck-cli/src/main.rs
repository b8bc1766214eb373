use clap::Parser;

mod cli;
mod logging;

use cli::args::Cli;
use cli::commands::{dispatch, exit_codes, load_app_config};
use symcheck_core::ConfigError;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();

    // config feeds the log filter, so it is loaded before logging exists
    let cfg = match load_app_config(&cli.global) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e}");
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };
    logging::init(&cfg.log_level, cli.global.log_json);

    let code = match dispatch(cli, cfg).await {
        Ok(code) => code,
        Err(e) if e.downcast_ref::<ConfigError>().is_some() => {
            eprintln!("config error: {e}");
            exit_codes::CONFIG_ERROR
        }
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::RUNTIME_ERROR
        }
    };
    std::process::exit(code);
}
