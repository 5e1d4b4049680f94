use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("File operation failed")]
    FileOperationFailed(#[from] std::io::Error),
    #[error("Path target is invalid")]
    InvalidTargetPath,
    #[error("Terminal not initialized")]
    TerminalNotInitialized,
}
