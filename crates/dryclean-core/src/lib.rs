pub mod address;
pub mod app_config;
pub mod calendar;
pub mod config;
pub mod format;
pub mod reconcile;
pub mod states;

pub use address::{Address, AddressId, AddressType, Coordinates, LocalAddress};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use reconcile::{reconcile, Origin, ReconciledEntry};
pub use states::{load_state_options, match_state, StateOption, StatesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read states file {path}: {source}")]
    StatesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse states file: {0}")]
    StatesFileParse(#[from] serde_yaml::Error),

    #[error("states validation failed: {0}")]
    Validation(String),
}
