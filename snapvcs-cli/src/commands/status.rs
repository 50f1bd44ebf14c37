use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub fn run(root: PathBuf) -> Result<()> {
    let repo = super::open_repo(&root)?;
    let status = repo.status()?;

    if status.is_clean() {
        println!("{}", "Nothing to commit, working tree clean".green());
        return Ok(());
    }

    print_section("Changes to be committed:".green().bold(), &status.staged);
    print_section(
        "Changes not staged for commit:".yellow().bold(),
        &status.modified,
    );
    print_section("Untracked files:".red().bold(), &status.untracked);

    Ok(())
}

fn print_section(title: ColoredString, paths: &BTreeSet<PathBuf>) {
    if paths.is_empty() {
        return;
    }

    println!("{}", title);
    for path in paths {
        println!("  {}", path.display());
    }
    println!();
}
