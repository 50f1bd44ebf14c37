use anyhow::Result;
use colored::Colorize;
use snapvcs_core::CommitOutcome;
use std::path::PathBuf;

pub fn run(root: PathBuf, message: String) -> Result<()> {
    let repo = super::open_repo(&root)?;

    match repo.commit(&message)? {
        CommitOutcome::Created(id) => {
            println!("{}", "✓ Files committed successfully".green().bold());
            println!("  {}: {}", "Commit ID".bold(), id);
            println!("  {}: {}", "Message".bold(), message);
        }
        CommitOutcome::NothingToCommit => {
            println!("{}", "Nothing to commit, staging area is empty".yellow());
        }
    }

    Ok(())
}
