use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save data is malformed: {0}")]
    Corrupt(String),

    #[error("save store failed: {0}")]
    Store(String),

    #[error("save version {0} is newer than this game supports")]
    UnsupportedVersion(u32),
}
