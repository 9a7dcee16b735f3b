//! Configuration for sectorstore

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the snapshot file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Optional topology file overriding the embedded catalog
    #[serde(default)]
    pub topology_path: Option<PathBuf>,
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sectorstore")
        .join(crate::SNAPSHOT_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            topology_path: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("sectorstore").join("config.yml")),
            Some(PathBuf::from("sectorstore.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");

        let config = Config {
            store_path: PathBuf::from("/tmp/ss/snapshot.json"),
            topology_path: Some(PathBuf::from("/tmp/ss/topology.yml")),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.store_path, config.store_path);
        assert_eq!(loaded.topology_path, config.topology_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "topology_path: /etc/sectorstore/topology.yml\n").unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.store_path, default_store_path());
        assert!(loaded.topology_path.is_some());
    }
}
