use std::path::{Component, Path};

pub const DEFAULT_METADATA_DIR: &str = ".snapvcs";

/// Fixed layout and exclusion settings for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Name of the metadata directory at the working-tree root.
    pub metadata_dir: String,
    /// Top-level directories never tracked. Always includes `metadata_dir`.
    pub reserved_dirs: Vec<String>,
    /// File names never tracked, wherever they appear.
    pub reserved_files: Vec<String>,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            metadata_dir: DEFAULT_METADATA_DIR.to_string(),
            reserved_dirs: vec![DEFAULT_METADATA_DIR.to_string(), ".vscode".to_string()],
            reserved_files: vec!["snapvcs".to_string(), "snapvcs.exe".to_string()],
        }
    }
}

impl RepoConfig {
    pub fn with_metadata_dir(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.reserved_dirs.retain(|d| d != &self.metadata_dir);
        self.reserved_dirs.push(name.clone());
        self.metadata_dir = name;
        self
    }

    pub fn with_reserved_files(mut self, names: Vec<String>) -> Self {
        self.reserved_files = names;
        self
    }

    /// Whether a path relative to the working-tree root is excluded.
    pub fn is_reserved(&self, rel: &Path) -> bool {
        let mut components = rel.components();
        let first = match components.next() {
            Some(Component::Normal(name)) => name,
            _ => return true,
        };

        if self.reserved_dirs.iter().any(|d| first == d.as_str()) {
            return true;
        }

        rel.file_name()
            .map(|name| self.reserved_files.iter().any(|f| name == f.as_str()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reserved_paths() {
        let config = RepoConfig::default();

        assert!(config.is_reserved(Path::new(".snapvcs")));
        assert!(config.is_reserved(Path::new(".snapvcs/HEAD")));
        assert!(config.is_reserved(Path::new(".vscode/settings.json")));
        assert!(config.is_reserved(Path::new("snapvcs")));
        assert!(config.is_reserved(Path::new("bin/snapvcs.exe")));
        assert!(config.is_reserved(Path::new("")));

        assert!(!config.is_reserved(Path::new("a.txt")));
        assert!(!config.is_reserved(Path::new("src/.snapvcs.rs")));
        assert!(!config.is_reserved(Path::new("docs/.vscode")));
    }

    #[test]
    fn test_custom_metadata_dir() {
        let config = RepoConfig::default().with_metadata_dir(".meta");

        assert_eq!(config.metadata_dir, ".meta");
        assert!(config.is_reserved(Path::new(".meta/HEAD")));
        assert!(!config.is_reserved(Path::new(".snapvcs/HEAD")));
        assert!(config.is_reserved(Path::new(".vscode")));
    }

    #[test]
    fn test_custom_reserved_files() {
        let config = RepoConfig::default().with_reserved_files(vec!["build.log".to_string()]);

        assert!(config.is_reserved(Path::new("build.log")));
        assert!(config.is_reserved(Path::new("out/build.log")));
        assert!(!config.is_reserved(Path::new("snapvcs")));
        assert!(config.is_reserved(Path::new(".snapvcs/HEAD")));
    }
}
