mod load;
mod types;

pub use load::{apply_env_overrides, get_humanizer_data_dir, load_default, load_from};
pub use types::{
    AppConfig, BackendConfig, CommandBackendConfig, HttpBackendConfig, InputProtocol,
    LoggingConfig,
};
