use std::path::{Path, PathBuf};

use super::types::{AppConfig, BackendConfig, CommandBackendConfig, HttpBackendConfig};

/// Get the default humanizer data directory: ~/.humanizer
pub fn get_humanizer_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".humanizer"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    let data_dir = get_humanizer_data_dir()?;
    let mut cfg = load_from(&data_dir, Path::new("config.toml"))?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Priority 1: `<data_dir>/config.toml`, priority 2: `local_config`, else defaults.
pub fn load_from(data_dir: &Path, local_config: &Path) -> anyhow::Result<AppConfig> {
    let user_config = data_dir.join("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)
            .map_err(|e| anyhow::anyhow!("{}: {}", user_config.display(), e))?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)
            .map_err(|e| anyhow::anyhow!("{}: {}", local_config.display(), e))?
    } else {
        AppConfig::default()
    };

    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    Ok(cfg)
}

/// Environment overrides (highest priority). Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(provider) = get("HUMANIZER_BACKEND") {
        match provider.trim() {
            "command" => {
                if !matches!(cfg.backend, BackendConfig::Command(_)) {
                    cfg.backend = BackendConfig::Command(CommandBackendConfig::default());
                }
            }
            "http" => {
                if !matches!(cfg.backend, BackendConfig::Http(_)) {
                    cfg.backend = BackendConfig::Http(HttpBackendConfig::default());
                }
            }
            other => anyhow::bail!("unknown HUMANIZER_BACKEND '{}' (expected command or http)", other),
        }
    }

    match &mut cfg.backend {
        BackendConfig::Command(cmd_cfg) => {
            if let Some(v) = get("HUMANIZER_COMMAND") {
                cmd_cfg.program = v;
            }
        }
        BackendConfig::Http(http_cfg) => {
            if let Some(v) = get("HUMANIZER_URL") {
                http_cfg.url = v;
            }
            if let Some(v) = get("HUMANIZER_API_KEY") {
                http_cfg.api_key = v;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputProtocol;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_no_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from(dir.path(), &dir.path().join("missing.toml")).unwrap();

        assert_eq!(cfg.backend.provider(), "command");
        assert!(!cfg.logging.console);
        assert_eq!(cfg.logging.max_files, 7);
        assert_eq!(
            cfg.logging.directory,
            Some(dir.path().join("logs").to_string_lossy().to_string())
        );
    }

    #[test]
    fn user_config_wins_over_local_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[backend]\nprovider = \"http\"\nurl = \"https://humanize.example/api\"\n",
        )
        .unwrap();
        let local = dir.path().join("local.toml");
        std::fs::write(&local, "[backend]\nprovider = \"command\"\nprogram = \"cat\"\n").unwrap();

        let cfg = load_from(dir.path(), &local).unwrap();
        match cfg.backend {
            BackendConfig::Http(http) => {
                assert_eq!(http.url, "https://humanize.example/api");
                assert_eq!(http.timeout_ms, 30_000);
            }
            other => panic!("expected http backend, got {:?}", other),
        }
    }

    #[test]
    fn command_backend_fields_parse() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.toml");
        std::fs::write(
            &local,
            r#"
[logging]
level = "debug"
max_files = 3

[backend]
provider = "command"
program = "python3"
args = ["-m", "humano"]
input = "text"
min_version = "3.6"

[backend.env]
PYTHONIOENCODING = "utf-8"
"#,
        )
        .unwrap();

        let cfg = load_from(dir.path(), &local).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.max_files, 3);
        let BackendConfig::Command(cmd) = cfg.backend else {
            panic!("expected command backend");
        };
        assert_eq!(cmd.program, "python3");
        assert_eq!(cmd.args, vec!["-m".to_string(), "humano".to_string()]);
        assert_eq!(cmd.input, InputProtocol::Text);
        assert_eq!(cmd.min_version.as_deref(), Some("3.6"));
        assert_eq!(cmd.version_args, vec!["--version".to_string()]);
        assert_eq!(cmd.env.get("PYTHONIOENCODING").map(String::as_str), Some("utf-8"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.toml");
        std::fs::write(&local, "[backend\nprovider = ").unwrap();

        let err = load_from(dir.path(), &local).unwrap_err();
        assert!(err.to_string().contains("local.toml"));
    }

    #[test]
    fn env_overrides_switch_backend_and_fill_fields() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            env(&[
                ("HUMANIZER_BACKEND", "http"),
                ("HUMANIZER_URL", "http://localhost:9000/h"),
                ("HUMANIZER_API_KEY", "secret"),
                ("HUMANIZER_COMMAND", "ignored"),
            ]),
        )
        .unwrap();

        let BackendConfig::Http(http) = cfg.backend else {
            panic!("expected http backend");
        };
        assert_eq!(http.url, "http://localhost:9000/h");
        assert_eq!(http.api_key, "secret");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, env(&[("HUMANIZER_COMMAND", "   ")])).unwrap();

        let BackendConfig::Command(cmd) = cfg.backend else {
            panic!("expected command backend");
        };
        assert_eq!(cmd.program, "humano");
    }

    #[test]
    fn unknown_backend_env_is_rejected() {
        let mut cfg = AppConfig::default();
        let err = apply_env_overrides(&mut cfg, env(&[("HUMANIZER_BACKEND", "grpc")])).unwrap_err();
        assert!(err.to_string().contains("grpc"));
    }
}
