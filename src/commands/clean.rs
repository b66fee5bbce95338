//! Clean the generation directory

use std::fs;

use crate::error::{Error, Result};
use crate::Site;

/// Delete the generation directory. Returns whether anything was removed
pub fn run(site: &Site) -> Result<bool> {
    if !site.output_dir.exists() {
        tracing::debug!("Nothing to clean at {:?}", site.output_dir);
        return Ok(false);
    }

    fs::remove_dir_all(&site.output_dir).map_err(|source| Error::Write {
        path: site.output_dir.clone(),
        source,
    })?;
    tracing::info!("Deleted: {:?}", site.output_dir);
    Ok(true)
}
