use super::exit_codes;
use symcheck_core::config::models::{ALLOWED_MODELS, DEFAULT_MODEL};
use symcheck_core::config::AppConfig;
use symcheck_core::templates::SAFETY_NOTES;

pub fn models(cfg: &AppConfig) -> anyhow::Result<i32> {
    for m in ALLOWED_MODELS {
        let mut tags = Vec::new();
        if *m == DEFAULT_MODEL {
            tags.push("default");
        }
        if *m == cfg.params.model {
            tags.push("selected");
        }
        if tags.is_empty() {
            println!("{}", m);
        } else {
            println!("{} ({})", m, tags.join(", "));
        }
    }
    Ok(exit_codes::OK)
}

pub fn safety() -> anyhow::Result<i32> {
    print!("{}", SAFETY_NOTES);
    Ok(exit_codes::OK)
}
