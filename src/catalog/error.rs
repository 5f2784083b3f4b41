use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog path not found: {0}")]
    PathNotFound(String),
    #[error("Catalog read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid GP JSON in {file}: {message}")]
    InvalidJson { file: String, message: String },
    #[error("NORAD {0} is not in the catalog")]
    UnknownObject(u32),
}
