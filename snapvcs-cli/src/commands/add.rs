use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub fn run(root: PathBuf, paths: Vec<PathBuf>) -> Result<()> {
    let repo = super::open_repo(&root)?;

    let report = if paths.len() == 1 && paths[0] == Path::new(".") {
        repo.add_all()?
    } else {
        repo.add_paths(&paths)?
    };

    for (path, reason) in &report.skipped {
        println!(
            "{} {} {}",
            "Warning:".yellow().bold(),
            path.display(),
            reason.as_str()
        );
    }

    if !report.staged.is_empty() {
        println!(
            "{} {}",
            "Staged".green(),
            format!("{} file(s)", report.staged.len()).bold()
        );
    }

    Ok(())
}
