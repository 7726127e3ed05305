use isola_core::BoardError;
use thiserror::Error;

use alphabeta_engine::EngineError;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid match config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("unknown engine spec {0:?}")]
    UnknownEngine(String),
}

impl TournamentError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        TournamentError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
