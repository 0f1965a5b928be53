use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write graph export: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    Xml(String),
}
