use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid color '{value}' for theme.{field}: expected #rrggbb")]
    InvalidColor { field: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("{action} failed: {message}")]
    Failed {
        action: &'static str,
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to start window: {0}")]
    Window(#[from] eframe::Error),
}
