use thiserror::Error;

pub type SellersolResult<T> = Result<T, SellersolError>;

#[derive(Error, Debug)]
pub enum SellersolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a readable spreadsheet: {0}")]
    Format(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
