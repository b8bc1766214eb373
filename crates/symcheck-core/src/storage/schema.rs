pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS queries (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  timestamp TEXT NOT NULL,
  symptoms TEXT NOT NULL,
  response_text TEXT NOT NULL
);
"#;
