use crate::config::AppConfig;
use std::io;
use std::path::PathBuf;

/// On-disk locations derived from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub db_dir: PathBuf,
    pub log_dir: PathBuf,
    pub db_file: PathBuf,
}

impl Paths {
    pub fn resolve(config: &AppConfig) -> Self {
        let root = config.root_dir.clone();
        let db_dir = root.join(&config.db_dir);
        let log_dir = root.join(&config.log_dir);
        let db_file = db_dir.join(&config.db_name);
        Self {
            root,
            db_dir,
            log_dir,
            db_file,
        }
    }

    /// Creates the db and log directories if missing and returns the ones created.
    pub fn ensure(&self) -> io::Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for dir in [&self.db_dir, &self.log_dir] {
            if !dir.is_dir() {
                std::fs::create_dir_all(dir)?;
                created.push(dir.clone());
            }
        }
        Ok(created)
    }
}
