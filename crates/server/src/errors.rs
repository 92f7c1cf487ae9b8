use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot load {resource} records: {source}")]
    Seed {
        resource: models::ResourceKind,
        #[source]
        source: service::errors::ServiceError,
    },
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
