//! Application configuration and the on-disk layout derived from it.

use std::env;
use std::path::{Path, PathBuf};

use charsheet_domain::CharacterName;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_FILTER: &str = "charsheet_engine=info";

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the `characters/` and `databases/` folders
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("CHARSHEET_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            log_filter: env::var("CHARSHEET_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    pub fn paths(&self) -> DataPaths {
        DataPaths::new(&self.data_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Portrait file names, in lookup order.
pub const PORTRAIT_FILES: [&str; 4] = [
    "character.png",
    "character.jpg",
    "character.jpeg",
    "character.bmp",
];

/// Every path the engine reads or writes, derived from the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn characters_dir(&self) -> PathBuf {
        self.root.join("characters")
    }

    pub fn databases_dir(&self) -> PathBuf {
        self.root.join("databases")
    }

    pub fn reference_file(&self, file: &str) -> PathBuf {
        self.databases_dir().join(file)
    }

    pub fn character_dir(&self, name: &CharacterName) -> PathBuf {
        self.characters_dir().join(name.as_str())
    }

    pub fn record_file(&self, name: &CharacterName) -> PathBuf {
        self.character_dir(name).join("character.csv")
    }

    pub fn inventory_file(&self, name: &CharacterName) -> PathBuf {
        self.character_dir(name).join("inventory.csv")
    }

    pub fn spells_file(&self, name: &CharacterName) -> PathBuf {
        self.character_dir(name).join("spells.csv")
    }

    pub fn slots_file(&self, name: &CharacterName) -> PathBuf {
        self.character_dir(name).join("slots.csv")
    }

    pub fn notes_file(&self, name: &CharacterName) -> PathBuf {
        self.character_dir(name).join("notes.json")
    }

    /// Legacy free-form scratch pad.
    pub fn scratch_file(&self, name: &CharacterName) -> PathBuf {
        self.character_dir(name).join("notes.txt")
    }

    pub fn portrait_candidates(&self, name: &CharacterName) -> impl Iterator<Item = PathBuf> + '_ {
        let dir = self.character_dir(name);
        PORTRAIT_FILES.iter().map(move |file| dir.join(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_folder_layout() {
        let paths = DataPaths::new("/srv/sheets");
        let aria = CharacterName::new("Aria").unwrap();

        assert_eq!(
            paths.record_file(&aria),
            PathBuf::from("/srv/sheets/characters/Aria/character.csv")
        );
        assert_eq!(
            paths.reference_file("Races.tsv"),
            PathBuf::from("/srv/sheets/databases/Races.tsv")
        );
        let portraits: Vec<PathBuf> = paths.portrait_candidates(&aria).collect();
        assert_eq!(portraits.len(), 4);
        assert!(portraits[0].ends_with("character.png"));
    }

    #[test]
    fn default_config_uses_relative_data_dir() {
        let config = AppConfig::default();
        assert_eq!(config.paths().root(), Path::new("data"));
        assert_eq!(config.log_filter, "charsheet_engine=info");
    }
}
