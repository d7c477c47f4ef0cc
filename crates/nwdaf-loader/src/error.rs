use mongodb::error::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The endpoint could not be parsed or reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server or source rejected the filter, projection or command.
    #[error("query error: {0}")]
    Query(String),

    #[error("config error: {0}")]
    Config(String),
}

impl LoaderError {
    pub fn is_connection(&self) -> bool {
        matches!(self, LoaderError::Connection(_))
    }

    pub fn is_query(&self) -> bool {
        matches!(self, LoaderError::Query(_))
    }
}

impl From<mongodb::error::Error> for LoaderError {
    fn from(e: mongodb::error::Error) -> Self {
        match e.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. } => LoaderError::Connection(e.to_string()),
            _ => LoaderError::Query(e.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for LoaderError {
    fn from(e: serde_yaml::Error) -> Self {
        LoaderError::Config(e.to_string())
    }
}
