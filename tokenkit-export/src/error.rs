use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid DTCG document: {0}")]
    DtcgParse(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("components '{first}' and '{second}' both export as {export_name}")]
    DuplicateComponent { export_name: String, first: String, second: String },
}

impl From<handlebars::RenderError> for ExportError {
    fn from(err: handlebars::RenderError) -> Self {
        ExportError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
