use uuid::Uuid;

/// Document ids keep a collection prefix ("job-…", "note-…") so they stay
/// readable in logs and fixtures.
pub fn doc_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}
