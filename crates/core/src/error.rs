use chatlens_types::KeyError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read config file {path}: {source}", path = path.display())]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config schema mismatch at {path}: {source}")]
    ConfigSchema {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid item kind {value:?}: {source}")]
    InvalidItemKind {
        value: String,
        #[source]
        source: KeyError,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
