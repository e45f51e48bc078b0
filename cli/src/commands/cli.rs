use clap::Parser;

/// First-argument spellings that switch to the dependency report.
pub const HELP_ARGS: [&str; 3] = ["--help", "-h", "help"];

/// Reads a JSON request on stdin and writes the humanized result to stdout.
///
/// Built-in help and version flags are disabled: `--help`, `-h` and `help`
/// print the dependency report instead. Everything else is ignored.
#[derive(Parser, Debug, Default)]
#[command(
    name = "humanizer",
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Args {
    #[arg(
        value_name = "ARGS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub rest: Vec<String>,
}

impl Args {
    pub fn wants_diagnostics(&self) -> bool {
        self.rest
            .first()
            .map(|a| HELP_ARGS.contains(&a.as_str()))
            .unwrap_or(false)
    }
}
