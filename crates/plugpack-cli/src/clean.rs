//! Clean command implementation.

use crate::config::BuildConfig;
use anyhow::Result;
use plugpack::Packager;
use std::path::PathBuf;

/// Run the clean command.
pub fn run(config_path: Option<String>, root: Option<String>) -> Result<()> {
    let root = PathBuf::from(root.unwrap_or_else(|| ".".to_string()));
    let config_path = config_path.unwrap_or_else(|| "plugpack.toml".to_string());

    let config = BuildConfig::from_file(root.join(&config_path))?;
    config.validate()?;

    let staging_dir = root.join(&config.output.directory);
    Packager::new(&root).clean(&staging_dir)?;

    println!("Cleaned {}", staging_dir.display());
    Ok(())
}
