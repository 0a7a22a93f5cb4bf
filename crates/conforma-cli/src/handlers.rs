//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

pub mod check;
pub mod completions;
pub mod validate;

pub use check::handle_check;
pub use completions::handle_completions;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use std::path::Path;

/// Fail with a FileNotFound error unless `path` exists.
pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
