use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("cannot read seed file {path}: {source}")]
    SeedIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed file {path}: {source}")]
    SeedParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("model error: {0}")]
    Model(#[from] models::ModelError),
}
