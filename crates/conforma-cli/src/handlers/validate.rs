//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::ensure_exists;
use crate::output::OutputWriter;
use conforma_core::{load_document, load_schema};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(_config, output), fields(schema = %args.schema.display()))]
pub fn handle_validate(
    args: ValidateArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    info!("starting validation");
    ensure_exists(&args.schema)?;

    debug!("loading schema file");
    let schema = load_schema(&args.schema)?;
    output.info(&format!("Schema: {}", args.schema.display()))?;

    let total = args.documents.len();
    let mut invalid = 0;

    for document_path in &args.documents {
        ensure_exists(document_path)?;
        debug!(document = %document_path.display(), "loading document");
        let document = load_document(document_path)?;

        match schema.validate(&document) {
            Ok(validated) => {
                info!(document = %document_path.display(), "document is valid");
                output.success(&format!("✓ {}", document_path.display()))?;
                if args.detailed {
                    output.section("Validated Document")?;
                    output.data(&validated)?;
                }
            }
            Err(failure) => {
                invalid += 1;
                warn!(document = %document_path.display(), "document failed validation");
                output.error(&format!("✗ {}", document_path.display()))?;
                output.failure(&failure, args.detailed)?;
            }
        }
    }

    if invalid > 0 {
        Err(Error::Validation { invalid, total })
    } else {
        info!(total, "all documents valid");
        Ok(())
    }
}
