use anyhow::Result;

use humanizer_core::api::{BackendConfig, Humanizer};

use crate::backend::{CommandHumanizer, HttpHumanizer};

pub fn build_humanizer(cfg: &BackendConfig) -> Result<Box<dyn Humanizer>> {
    match cfg {
        BackendConfig::Command(cmd_cfg) => Ok(Box::new(CommandHumanizer::new(cmd_cfg.clone()))),
        BackendConfig::Http(http_cfg) => Ok(Box::new(HttpHumanizer::new(http_cfg.clone())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanizer_core::api::HttpBackendConfig;

    #[test]
    fn selects_backend_by_provider() {
        let cmd = build_humanizer(&BackendConfig::default()).unwrap();
        assert_eq!(cmd.name(), "command");

        let http = build_humanizer(&BackendConfig::Http(HttpBackendConfig::default())).unwrap();
        assert_eq!(http.name(), "http");
    }
}
