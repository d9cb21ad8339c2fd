//! Database schema definitions

/// SQL to create the reviews table
pub const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    language TEXT NOT NULL,
    feedback TEXT NOT NULL,
    ts INTEGER NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_reviews_ts ON reviews(ts)",
];

/// Append a review; the store assigns and returns the id
pub const INSERT_REVIEW: &str =
    "INSERT INTO reviews (code, language, feedback, ts) VALUES (?1, ?2, ?3, ?4) RETURNING id";

/// Most recent reviews, newest first
pub const SELECT_HISTORY: &str =
    "SELECT id, language, ts AS timestamp FROM reviews ORDER BY ts DESC, id DESC LIMIT ?1";

/// Feedback of reviews whose code contains ?1 (case-sensitive substring)
pub const SELECT_FEEDBACK_MATCHING: &str =
    "SELECT feedback FROM reviews WHERE instr(code, ?1) > 0 LIMIT ?2";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_REVIEWS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
