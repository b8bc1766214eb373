use super::{ensure_parent_dir, exit_codes};
use crate::cli::args::AnalyzeArgs;
use anyhow::Context;
use std::io::{BufRead, IsTerminal, Write};
use symcheck_core::config::credentials::{resolve_api_key, API_KEY_ENV};
use symcheck_core::config::{AppConfig, ProviderKind};
use symcheck_core::report::console::render_advisory;
use symcheck_core::storage::{log_persist_skipped, Store};
use symcheck_core::{AdvisoryPipeline, ConfigError};
use tokio::io::AsyncReadExt;

pub async fn run(args: AnalyzeArgs, mut cfg: AppConfig) -> anyhow::Result<i32> {
    if let Some(p) = &args.provider {
        cfg.provider = p.parse()?;
    }
    if let Some(m) = &args.model {
        cfg.params.model = m.clone();
    }
    if let Some(t) = args.temperature {
        cfg.params.temperature = t;
    }
    if let Some(n) = args.max_tokens {
        cfg.params.max_tokens = n;
    }
    cfg.validate()?;

    if cfg.provider == ProviderKind::Groq {
        let manual = args.api_key.clone();
        let resolved = resolve_api_key(std::env::var(API_KEY_ENV).ok(), &args.secrets, || {
            manual.or_else(prompt_for_key)
        })?;
        let (key, source) = resolved.ok_or_else(|| ConfigError::MissingCredential {
            secrets_hint: args.secrets.display().to_string(),
        })?;
        tracing::info!(event = "symcheck.credential.resolved", source = source.as_str());
        cfg.api_key = Some(key);
    }

    let pipeline = AdvisoryPipeline::from_config(&cfg)?;

    let symptoms = match args.symptoms {
        Some(s) => s,
        None => read_stdin().await?,
    };
    if symptoms.trim().is_empty() {
        eprintln!("Please enter symptoms before analyzing.");
        return Ok(exit_codes::CONFIG_ERROR);
    }

    eprintln!(
        "Querying {} ({}) - processing...",
        pipeline.provider_name(),
        cfg.params.model
    );
    let advisory = pipeline.analyze(&symptoms, &cfg.params).await;
    print!("{}", render_advisory(&advisory, args.show_raw));

    if args.no_history {
        return Ok(exit_codes::OK);
    }

    // the advisory is already on screen; a failed history write must not fail the run
    match persist(&cfg, &symptoms, &advisory.text) {
        Ok(id) => eprintln!("saved to history as #{}", id),
        Err(e) => {
            log_persist_skipped(&e);
            eprintln!("note: history not saved ({})", e);
        }
    }

    Ok(exit_codes::OK)
}

fn persist(
    cfg: &AppConfig,
    symptoms: &str,
    response_text: &str,
) -> Result<i64, symcheck_core::StorageError> {
    ensure_parent_dir(&cfg.db_path)?;
    let store = Store::initialize(&cfg.db_path)?;
    store.insert(symptoms, response_text)
}

async fn read_stdin() -> anyhow::Result<String> {
    if std::io::stdin().is_terminal() {
        eprintln!("Describe your symptoms (be as specific as possible), then press Ctrl-D:");
    }
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("failed to read symptoms from stdin")?;
    Ok(buf)
}

fn prompt_for_key() -> Option<String> {
    if !std::io::stdin().is_terminal() {
        return None;
    }
    eprint!("{} not found. Enter your Groq API key for this session: ", API_KEY_ENV);
    std::io::stderr().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    Some(line.trim().to_string())
}
