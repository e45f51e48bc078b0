use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr. Off by default: stderr carries the `Error:` line.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a daily `humanizer.log.<date>` file under `directory`.
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "humanizer_plugins=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Directory for log files. The loader fills in `<data dir>/logs` when empty or unset.
    #[serde(default)]
    pub directory: Option<String>,

    /// Number of daily log files kept; older ones are deleted at startup.
    #[serde(default = "default_logging_max_files")]
    pub max_files: usize,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    false
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

fn default_logging_max_files() -> usize {
    7
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
            max_files: default_logging_max_files(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum BackendConfig {
    #[serde(rename = "command")]
    Command(CommandBackendConfig),
    #[serde(rename = "http")]
    Http(HttpBackendConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Command(CommandBackendConfig::default())
    }
}

impl BackendConfig {
    pub fn provider(&self) -> &'static str {
        match self {
            BackendConfig::Command(_) => "command",
            BackendConfig::Http(_) => "http",
        }
    }
}

/// How the request is handed to a command backend on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputProtocol {
    /// `{"text", "strength", "personality"}` as one JSON object.
    Json,
    /// The raw text; parameters travel in environment variables only.
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandBackendConfig {
    #[serde(default = "default_command_program")]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_input_protocol")]
    pub input: InputProtocol,

    #[serde(default = "default_command_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum `major.minor[.patch]` reported by `program version_args`.
    #[serde(default)]
    pub min_version: Option<String>,

    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,

    /// Extra environment variables for the backend process.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn default_command_program() -> String {
    "humano".to_string()
}

fn default_input_protocol() -> InputProtocol {
    InputProtocol::Json
}

fn default_command_timeout_ms() -> u64 {
    60_000
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

impl Default for CommandBackendConfig {
    fn default() -> Self {
        Self {
            program: default_command_program(),
            args: Vec::new(),
            input: default_input_protocol(),
            timeout_ms: default_command_timeout_ms(),
            min_version: None,
            version_args: default_version_args(),
            env: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpBackendConfig {
    #[serde(default = "default_http_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_http_url() -> String {
    "http://127.0.0.1:8700/humanize".to_string()
}

fn default_http_timeout_ms() -> u64 {
    30_000
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            url: default_http_url(),
            api_key: String::new(),
            timeout_ms: default_http_timeout_ms(),
        }
    }
}
