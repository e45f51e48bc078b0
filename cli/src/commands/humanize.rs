use std::io::{Read, Write};

use humanizer_core::api::{self as core_api, AppConfig, CliError, HumanizeResponse};
use humanizer_plugins::factory;

/// One request: `reader` JSON in, one JSON line to `writer`.
#[tracing::instrument(name = "cli.humanize", skip_all, fields(backend = cfg.backend.provider()))]
pub async fn run_humanize<R: Read, W: Write>(
    cfg: &AppConfig,
    reader: &mut R,
    writer: &mut W,
) -> Result<HumanizeResponse, CliError> {
    let humanizer = factory::build_humanizer(&cfg.backend)?;
    let response = core_api::process(reader, writer, humanizer.as_ref()).await?;
    Ok(response)
}
