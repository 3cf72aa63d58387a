use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("Failed to find {path}")]
    MissingFile { path: String },

    #[error("failed to read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON file: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("report must contain a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("failed to parse config file `{path}`: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
