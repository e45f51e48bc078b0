//! `--help`: dependency report on stderr. Never touches stdin or stdout.

use std::io::{self, Write};

use humanizer_core::api::{AppConfig, Humanizer};
use humanizer_plugins::factory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReport {
    pub backend: String,
    pub issues: Vec<String>,
    pub install_hint: Vec<String>,
}

impl DependencyReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Dependencies Check Results:")?;
        writeln!(w, "Backend: {}", self.backend)?;

        if self.is_ok() {
            writeln!(w, "✓ All dependencies are available")?;
            return Ok(());
        }

        writeln!(w, "✗ Missing dependencies:")?;
        for issue in &self.issues {
            writeln!(w, "  - {}", issue)?;
        }

        if !self.install_hint.is_empty() {
            writeln!(w)?;
            writeln!(w, "Installation Instructions:")?;
            for line in &self.install_hint {
                writeln!(w, "{}", line)?;
            }
        }
        Ok(())
    }
}

pub async fn check(humanizer: &dyn Humanizer, mut issues: Vec<String>) -> DependencyReport {
    issues.extend(humanizer.check_dependencies().await);
    DependencyReport {
        backend: humanizer.name().to_string(),
        issues,
        install_hint: humanizer.install_hint(),
    }
}

/// Builds the configured backend and prints its report. Problems with the
/// configuration itself are listed as issues, not raised.
#[tracing::instrument(name = "cli.diagnostics", skip_all)]
pub async fn run_diagnostics<W: Write>(
    cfg: AppConfig,
    mut issues: Vec<String>,
    w: &mut W,
) -> io::Result<DependencyReport> {
    let report = match factory::build_humanizer(&cfg.backend) {
        Ok(humanizer) => check(humanizer.as_ref(), issues).await,
        Err(e) => {
            issues.push(format!("backend '{}' could not be built: {}", cfg.backend.provider(), e));
            DependencyReport {
                backend: cfg.backend.provider().to_string(),
                issues,
                install_hint: Vec::new(),
            }
        }
    };

    tracing::info!(backend = %report.backend, issues = report.issues.len(), "dependency check finished");
    report.write_to(w)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use humanizer_core::api::{BackendConfig, CommandBackendConfig};
    use pretty_assertions::assert_eq;

    fn render(report: &DependencyReport) -> String {
        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn healthy_report() {
        let report = DependencyReport {
            backend: "command".to_string(),
            issues: vec![],
            install_hint: vec!["ignored".to_string()],
        };
        assert_eq!(
            render(&report),
            "Dependencies Check Results:\nBackend: command\n✓ All dependencies are available\n"
        );
    }

    #[test]
    fn failing_report_lists_issues_and_instructions() {
        let report = DependencyReport {
            backend: "command".to_string(),
            issues: vec!["humano not found".to_string()],
            install_hint: vec!["1. Install humano".to_string()],
        };
        assert_eq!(
            render(&report),
            "Dependencies Check Results:\n\
             Backend: command\n\
             ✗ Missing dependencies:\n  - humano not found\n\
             \n\
             Installation Instructions:\n\
             1. Install humano\n"
        );
    }

    #[tokio::test]
    async fn config_issues_are_carried_into_the_report() {
        let cfg = AppConfig {
            backend: BackendConfig::Command(CommandBackendConfig {
                program: "definitely-not-a-humanizer-binary".to_string(),
                ..CommandBackendConfig::default()
            }),
            ..AppConfig::default()
        };

        let mut out = Vec::new();
        let report = run_diagnostics(cfg, vec!["config error: bad toml".to_string()], &mut out)
            .await
            .unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.issues[0], "config error: bad toml");
        assert_eq!(report.issues.len(), 2);
        assert!(String::from_utf8(out).unwrap().contains("Installation Instructions:"));
    }
}
