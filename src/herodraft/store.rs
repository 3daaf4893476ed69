use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use herodraft_model::HeroRecord;
use log::info;

use super::catalog::HeroCatalog;
use super::config::Config;

fn config_file_path() -> PathBuf {
    data_dir().join("config.yaml")
}

pub fn data_dir() -> PathBuf {
    let project_dirs = directories::ProjectDirs::from("com", "herodraft", "herodraft")
        .expect("Cannot retrieve project dirs");
    project_dirs.data_dir().to_owned()
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    info!("Config file: {}", path.to_string_lossy());
    if !path.exists() {
        info!("Config file does not exist, creating.");
        store_config(path, &Config::default())?;
    }
    let config_file = File::open(path)?;
    Ok(serde_yaml::from_reader(config_file)?)
}

pub fn store_config(path: &Path, config: &Config) -> Result<()> {
    ensure_dir_created(path)?;
    let config_file = File::create(path)?;
    Ok(serde_yaml::to_writer(config_file, config)?)
}

pub fn load_heroes(path: &Path) -> Result<Vec<HeroRecord>> {
    info!("Hero data file: {}", path.to_string_lossy());
    let heroes_file =
        File::open(path).with_context(|| format!("Cannot open {}", path.to_string_lossy()))?;
    let heroes: Vec<HeroRecord> = serde_yaml::from_reader(heroes_file)
        .with_context(|| format!("Malformed hero data in {}", path.to_string_lossy()))?;
    info!("Loaded {} hero records", heroes.len());
    Ok(heroes)
}

/// Loads and validates the hero table. Any failure here is fatal for the server.
pub fn load_catalog(path: &Path) -> Result<HeroCatalog> {
    let records = load_heroes(path)?;
    HeroCatalog::from_records(records).context("Hero data failed validation")
}

fn ensure_dir_created(path: &Path) -> Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", &dir.to_string_lossy()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use herodraft_model::{HeroId, UiVariant};
    use tempdir::TempDir;

    use super::*;

    const HEROES: &str = r#"
- id: 1
  fileName: liubei
  difficulty: 1
  isOpen: true
- id: 2
  fileName: zuoci
  difficulty: 4
  isOpen: true
  uiVariant: 2
- id: 3
  fileName: zuoci_skill
  difficulty: 4
  parentId: 2
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn loads_hero_catalog() {
        let dir = TempDir::new("herodraft").unwrap();
        let catalog = load_catalog(&write(&dir, "heroes.yaml", HEROES)).unwrap();
        assert_eq!(catalog.len(), 3);
        let zuoci = catalog.lookup(HeroId::from(2)).unwrap();
        assert_eq!(zuoci.ui_variant, UiVariant::WithSkillChain);
        assert_eq!(zuoci.file_ref, "images/002_zuoci.png");
        assert!(!catalog.lookup(HeroId::from(3)).unwrap().is_open);
        assert_eq!(catalog.chain_from(HeroId::from(2)).len(), 1);
    }

    #[test]
    fn invalid_catalog_is_an_error() {
        let dir = TempDir::new("herodraft").unwrap();
        let broken = "- id: 1\n  fileName: a\n  difficulty: 1\n  parentId: 9\n";
        let err = load_catalog(&write(&dir, "heroes.yaml", broken)).unwrap_err();
        assert!(format!("{err:#}").contains("missing parent"), "{err:#}");
    }

    #[test]
    fn example_hero_data_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/heroes.example.yaml");
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 12);
        let sunce = catalog.lookup(HeroId::from(11)).unwrap();
        assert_eq!(catalog.companions(sunce).len(), 1);
    }

    #[test]
    fn missing_hero_file_is_an_error() {
        let dir = TempDir::new("herodraft").unwrap();
        assert!(load_heroes(&dir.path().join("nope.yaml")).is_err());
    }

    #[test]
    fn creates_default_config() {
        let dir = TempDir::new("herodraft").unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = load_config_from(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(config, Config::default());
    }
}
