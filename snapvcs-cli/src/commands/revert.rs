use anyhow::Result;
use colored::Colorize;
use snapvcs_core::Error;
use std::path::PathBuf;

pub fn run(root: PathBuf, reference: String) -> Result<()> {
    let repo = super::open_repo(&root)?;

    let id = match repo.revert(&reference) {
        Ok(id) => id,
        Err(Error::EmptyHistory) => anyhow::bail!("No commits exist yet"),
        Err(Error::UnresolvedReference(r)) => anyhow::bail!("Invalid commit hash: {}", r),
        Err(e) => return Err(e.into()),
    };

    let commit = repo.read_commit(&id)?;

    println!("{}", "✓ Successfully created a revert commit".green().bold());
    println!("  {}: {}", "Commit ID".bold(), id);
    println!("  {}: {}", "Message".bold(), commit.message);
    println!(
        "  {}",
        "Working tree left unchanged; the restored files live in the new snapshot".dimmed()
    );

    Ok(())
}
