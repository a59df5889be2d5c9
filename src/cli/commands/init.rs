use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration file into the current directory.
///
/// An existing file is left untouched and reported as a failure.
pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    let created = if config_path.exists() {
        false
    } else {
        fs::write(config_path, format!("{}\n", default_config_json()?))?;
        tracing::debug!(path = %config_path.display(), "wrote config file");
        true
    };

    Ok(finish(CommandSummary::Init(InitSummary { created }), false))
}
