use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("api server error: {0}")]
    Api(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
