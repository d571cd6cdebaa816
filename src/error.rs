#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Script is {size} bytes, above the configured limit of {limit} bytes")]
    ScriptTooLarge { size: usize, limit: usize },
}

pub type Result<T = ()> = std::result::Result<T, Error>;
