//! Schema check command handler

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::ensure_exists;
use crate::output::OutputWriter;
use conforma_core::load_schema;
use tracing::{info, instrument};

/// Handle the check command: load and compile a schema file without
/// validating any documents, so authoring errors surface early.
#[instrument(skip(_config, output), fields(schema = %args.schema.display()))]
pub fn handle_check(
    args: CheckArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    ensure_exists(&args.schema)?;
    let schema = load_schema(&args.schema)?;
    info!("schema compiled successfully");
    output.success(&format!("✓ {} is a valid schema", args.schema.display()))?;
    output.info(&format!("  compiles to: {}", schema.descriptor()))?;
    Ok(())
}
