use std::path::PathBuf;

use herodraft_model::Difficulty;
use serde::{Deserialize, Serialize};

use super::store;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_serving_addr")]
    pub serving_addr: String,

    #[serde(default = "default_static_serving_dir")]
    pub static_serving_dir: PathBuf,

    /// Hero portraits, served under `/images`.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    #[serde(default = "default_hero_data_file")]
    pub hero_data_file: PathBuf,

    /// Heroes a player picks from when the request does not say.
    #[serde(default = "default_hero_count")]
    pub default_hero_count: usize,

    /// Spare heroes drawn on top of `default_hero_count`.
    #[serde(default)]
    pub default_change_count: usize,

    #[serde(default = "default_difficulties")]
    pub default_difficulties: Vec<Difficulty>,
}

fn default_serving_addr() -> String {
    "0.0.0.0:5000".into()
}

fn default_static_serving_dir() -> PathBuf {
    "ui/dist".into()
}

fn default_image_dir() -> PathBuf {
    "images".into()
}

fn default_hero_data_file() -> PathBuf {
    store::data_dir().join("heroes.yaml")
}

fn default_hero_count() -> usize {
    5
}

fn default_difficulties() -> Vec<Difficulty> {
    vec![1, 2, 3, 4, 5]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serving_addr: default_serving_addr(),
            static_serving_dir: default_static_serving_dir(),
            image_dir: default_image_dir(),
            hero_data_file: default_hero_data_file(),
            default_hero_count: default_hero_count(),
            default_change_count: 0,
            default_difficulties: default_difficulties(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config =
            serde_yaml::from_str("servingAddr: 127.0.0.1:8080\ndefaultChangeCount: 2\n").unwrap();
        assert_eq!(config.serving_addr, "127.0.0.1:8080");
        assert_eq!(config.default_change_count, 2);
        assert_eq!(config.default_hero_count, 5);
        assert_eq!(config.default_difficulties, vec![1, 2, 3, 4, 5]);
        assert_eq!(config.image_dir, PathBuf::from("images"));
    }
}
