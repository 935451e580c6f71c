use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    #[error("failed to read store: {0}")]
    Read(String),

    #[error("failed to write store: {0}")]
    Write(String),

    #[error("store content is corrupt: {0}")]
    Corrupt(String),
}
