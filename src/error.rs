use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors that can occur while loading an uploaded file or serving a page.
///
/// Missing columns are never errors: they resolve to
/// [`FieldValue::Missing`](crate::resolver::FieldValue::Missing).
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The upload is not valid delimited tabular data.
    #[error("could not parse the uploaded file: {0}")]
    Parse(String),

    /// Errors bubbled up from the CSV reader.
    #[error("could not parse the uploaded file: {0}")]
    Csv(#[from] csv::Error),

    /// The upload is not UTF-8 text.
    #[error("the uploaded file is not valid UTF-8 text")]
    Utf8(#[from] std::str::Utf8Error),

    /// The upload does not carry a `.csv` file name.
    #[error("unsupported file type '{0}', please upload a .csv file")]
    UnsupportedFile(String),

    /// The upload form was submitted without any file content.
    #[error("no file data received")]
    EmptyUpload,

    /// Wrapper for IO failures such as binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a page template fails to render.
    #[cfg(feature = "web")]
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Raised when the embedded templates fail to register.
    #[cfg(feature = "web")]
    #[error("template registration error: {0}")]
    TemplateRegistration(#[from] handlebars::TemplateError),
}

impl ViewerError {
    /// Whether the error was caused by the uploaded file rather than the server.
    ///
    /// Upload errors are shown to the user in place of the record view.
    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            ViewerError::Parse(_)
                | ViewerError::Csv(_)
                | ViewerError::Utf8(_)
                | ViewerError::UnsupportedFile(_)
                | ViewerError::EmptyUpload
        )
    }
}
