use anyhow::{Context, Result};
use colored::Colorize;
use snapvcs_core::Repository;
use std::path::PathBuf;

pub fn run(root: PathBuf) -> Result<()> {
    let repo = Repository::init(&root)
        .with_context(|| format!("Failed to initialize repository in {}", root.display()))?;

    println!(
        "{} {}",
        "Initialized empty repository in".green(),
        repo.metadata_dir().display()
    );

    Ok(())
}
