use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use humanizer_core::api as core_api;
use humanizer_core::api::{BackendError, CommandBackendConfig, HumanizeRequest, InputProtocol};

use super::response::decode_response;

/// Exit status shells use for "command not found".
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Runs an external program once per request.
pub struct CommandHumanizer {
    cfg: CommandBackendConfig,
}

impl CommandHumanizer {
    pub fn new(cfg: CommandBackendConfig) -> Self {
        Self { cfg }
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.cfg.timeout_ms.max(1))
    }

    fn build_command(&self, exe: &Path, request: &HumanizeRequest) -> Command {
        let mut cmd = Command::new(exe);
        cmd.args(&self.cfg.args)
            .envs(&self.cfg.env)
            .env("HUMANIZER_STRENGTH", request.strength.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        match &request.personality {
            Some(p) => {
                cmd.env("HUMANIZER_PERSONALITY", p);
            }
            None => {
                cmd.env_remove("HUMANIZER_PERSONALITY");
            }
        }
        cmd
    }

    fn payload(&self, request: &HumanizeRequest) -> Result<Vec<u8>, BackendError> {
        match self.cfg.input {
            InputProtocol::Json => serde_json::to_vec(request)
                .map_err(|e| BackendError::Failed(format!("failed to encode request: {e}"))),
            InputProtocol::Text => Ok(request.text.as_bytes().to_vec()),
        }
    }

    async fn probe_version(&self, exe: &Path) -> Result<Option<core_api::Version>, String> {
        let output = tokio::time::timeout(
            self.timeout(),
            Command::new(exe)
                .args(&self.cfg.version_args)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| format!("`{}` version check timed out", self.cfg.program))?
        .map_err(|e| format!("`{}` version check failed: {}", self.cfg.program, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(core_api::parse_version(&stdout).or_else(|| core_api::parse_version(&stderr)))
    }
}

#[async_trait]
impl core_api::Humanizer for CommandHumanizer {
    fn name(&self) -> &str {
        "command"
    }

    async fn humanize(&self, request: &HumanizeRequest) -> Result<Value, BackendError> {
        let exe = resolve_executable_path(&self.cfg.program).map_err(BackendError::Unavailable)?;
        tracing::debug!(exe = %exe.display(), input = ?self.cfg.input, "spawning humanizer command");

        let payload = self.payload(request)?;
        let mut child = self.build_command(&exe, request).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BackendError::Unavailable(format!(
                    "humanizer command '{}' could not be started: {}",
                    self.cfg.program, e
                ))
            } else {
                BackendError::Failed(format!("failed to spawn '{}': {}", self.cfg.program, e))
            }
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BackendError::Failed("child stdin unavailable".to_string()))?;
        let feed = async move {
            let res = async {
                stdin.write_all(&payload).await?;
                stdin.shutdown().await
            }
            .await;
            // A child that exits without reading its input closes the pipe early.
            if let Err(e) = res {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    tracing::warn!("writing to humanizer stdin failed: {}", e);
                }
            }
        };

        let (_, output) = tokio::time::timeout(self.timeout(), async move {
            tokio::join!(feed, child.wait_with_output())
        })
        .await
        .map_err(|_| {
            BackendError::Failed(format!(
                "'{}' timed out after {} ms",
                self.cfg.program, self.cfg.timeout_ms
            ))
        })?;
        let output = output.map_err(|e| {
            BackendError::Failed(format!("waiting for '{}' failed: {}", self.cfg.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let code = output.status.code();
            tracing::warn!(?code, stderr = %stderr, "humanizer command failed");

            let mut msg = match code {
                Some(c) => format!("'{}' exited with status {}", self.cfg.program, c),
                None => format!("'{}' was terminated by a signal", self.cfg.program),
            };
            if !stderr.is_empty() {
                msg.push_str(": ");
                msg.push_str(stderr);
            }
            if code == Some(EXIT_COMMAND_NOT_FOUND) {
                return Err(BackendError::Unavailable(msg));
            }
            return Err(BackendError::Failed(msg));
        }

        Ok(decode_response(&output.stdout))
    }

    async fn check_dependencies(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let exe = match resolve_executable_path(&self.cfg.program) {
            Ok(exe) => exe,
            Err(msg) => {
                issues.push(msg);
                return issues;
            }
        };

        let Some(min_raw) = self.cfg.min_version.as_deref() else {
            return issues;
        };
        let Some(minimum) = core_api::parse_version(min_raw) else {
            issues.push(format!("invalid min_version '{}' in backend config", min_raw));
            return issues;
        };

        match self.probe_version(&exe).await {
            Ok(Some(found)) if found.satisfies(&minimum) => {
                tracing::debug!(%found, %minimum, "humanizer command version ok");
            }
            Ok(Some(found)) => issues.push(format!(
                "{} {}+ required (found {})",
                self.cfg.program, min_raw, found
            )),
            Ok(None) => issues.push(format!(
                "could not determine {} version from `{} {}`",
                self.cfg.program,
                self.cfg.program,
                self.cfg.version_args.join(" ")
            )),
            Err(e) => issues.push(e),
        }

        issues
    }

    fn install_hint(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "1. Install the '{}' humanizer command and make sure it is on PATH",
            self.cfg.program
        )];
        if let Some(min) = &self.cfg.min_version {
            lines.push(format!("   (version {}+ is required)", min));
        }
        lines.push("   OR point HUMANIZER_COMMAND at its full path".to_string());
        lines.push("2. Or configure the backend in ~/.humanizer/config.toml:".to_string());
        lines.push("   [backend]".to_string());
        lines.push("   provider = \"command\"".to_string());
        lines.push("   program = \"/path/to/humanizer\"".to_string());
        lines
    }
}

/// Absolute paths are used as-is when they exist; anything else is looked up on PATH.
fn resolve_executable_path(program: &str) -> Result<PathBuf, String> {
    let path = Path::new(program);

    if program.trim().is_empty() {
        return Err("no humanizer command configured".to_string());
    }

    if path.is_absolute() {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(format!("humanizer command '{}' does not exist", program));
    }

    which::which(program).map_err(|e| {
        format!(
            "humanizer command '{}' not found on PATH ({}); install it or set HUMANIZER_COMMAND",
            program, e
        )
    })
}
