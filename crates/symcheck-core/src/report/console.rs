use crate::model::{Advisory, QueryRecord};
use crate::templates::DISCLAIMER;

const SYMPTOMS_PREVIEW_CHARS: usize = 60;
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn render_advisory(advisory: &Advisory, show_raw: bool) -> String {
    let mut s = String::new();
    s.push_str("Results\n");
    s.push_str(DISCLAIMER);
    s.push('\n');
    s.push_str(RULE);
    s.push('\n');
    s.push_str(&advisory.text);
    s.push('\n');

    if show_raw {
        s.push_str(RULE);
        s.push_str("\nLLM raw metadata (for debugging):\n");
        let raw = match &advisory.raw {
            Some(map) => serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".into()),
            None => "{}".to_string(),
        };
        s.push_str(&raw);
        s.push('\n');
    }
    s
}

/// `stored` is the size of the whole log, which may exceed `records` when a
/// limit applied.
pub fn render_history_table(records: &[QueryRecord], stored: u64) -> String {
    if records.is_empty() {
        if stored == 0 {
            return "No history yet. Use 'symcheck analyze' to add entries.\n".to_string();
        }
        return format!("No entries shown ({} stored); raise --limit to list them.\n", stored);
    }

    let mut s = String::new();
    s.push_str(&format!("{:>6}  {:<27}  {}\n", "id", "timestamp", "symptoms"));
    for r in records {
        s.push_str(&format!(
            "{:>6}  {:<27}  {}\n",
            r.id,
            r.timestamp,
            preview(&r.symptoms)
        ));
    }
    s
}

pub fn render_record(record: &QueryRecord) -> String {
    format!(
        "History #{} ({})\n\nSymptoms:\n{}\n\nLLM response:\n{}\n",
        record.id, record.timestamp, record.symptoms, record.response_text
    )
}

fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() > SYMPTOMS_PREVIEW_CHARS {
        let cut: String = flat.chars().take(SYMPTOMS_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
