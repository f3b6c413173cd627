//! Runtime configuration, derived entirely from the working directory.

use bookstore_core::{default_log_level, LogSettings, DEFAULT_DB_FILE_NAME};
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_settings: LogSettings,
}

impl AppConfig {
    pub fn from_working_dir() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::rooted_at(&cwd))
    }

    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DEFAULT_DB_FILE_NAME),
            log_settings: LogSettings::new(default_log_level(), dir.join(LOG_DIR_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::path::Path;

    #[test]
    fn paths_are_resolved_against_the_given_directory() {
        let config = AppConfig::rooted_at(Path::new("/srv/shop"));

        assert_eq!(config.db_path, Path::new("/srv/shop/ebookstore2.db"));
        assert_eq!(config.log_settings.log_dir, Path::new("/srv/shop/logs"));
        assert!(!config.log_settings.level.is_empty());
    }
}
