use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Model loading error: {0}")]
    Loader(#[from] probable_paths::loader::LoaderError),
    #[error("Path query error: {0}")]
    Ksp(#[from] probable_paths::ksp::KspError),
    #[error("JSON rendering error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
