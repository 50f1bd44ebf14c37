use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn run(root: PathBuf, limit: Option<usize>) -> Result<()> {
    let repo = super::open_repo(&root)?;

    if repo.head()?.is_none() {
        println!("{}", "No commits yet".yellow());
        return Ok(());
    }

    let mut shown = 0;
    let mut history = repo.log()?;

    for entry in history.by_ref().take(limit.unwrap_or(usize::MAX)) {
        let commit = entry?;

        println!(
            "{} {}",
            "commit".yellow().bold(),
            commit.id.to_string().yellow()
        );
        if let Some(parent) = &commit.parent {
            println!("{}: {}", "Parent".bold(), parent.short());
        }
        println!("{}: {}", "Date".bold(), commit.display_timestamp());
        println!();
        println!("    {}", commit.message);
        println!();

        shown += 1;
    }

    if history.next().is_some() {
        println!(
            "{}",
            format!("... more commits beyond the first {}", shown).dimmed()
        );
        println!("Use {} to see more", "--limit N".cyan());
    }

    Ok(())
}
