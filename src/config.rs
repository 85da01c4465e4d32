use std::fs;
use std::io::Write;
use std::path::PathBuf;

use dirs_next as dirs;
use globset::{Glob, GlobSet};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

fn default_weight_size() -> f64 {
    2.0
}

fn default_weight_days() -> f64 {
    0.01
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Linear multiplier on gigabytes of installed footprint.
    #[serde(default = "default_weight_size")]
    pub weight_size: f64,

    /// Linear multiplier on days since last use.
    #[serde(default = "default_weight_days")]
    pub weight_days: f64,

    /// Display-name globs to hide from scan results.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            weight_size: default_weight_size(),
            weight_days: default_weight_days(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let path = config_file_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(path)?;
        let contents = toml::to_string_pretty(self)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    pub fn append_exclude(&mut self, value: String) {
        if !self.exclude.iter().any(|existing| existing == &value) {
            self.exclude.push(value);
        }
    }

    pub fn compile_excludes(&self) -> Result<Option<GlobSet>, AppError> {
        if self.exclude.is_empty() {
            return Ok(None);
        }

        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Some(builder.build()?))
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("graveyard").join("config.toml"))
}

pub fn ensure_config_file() -> Result<PathBuf, AppError> {
    let path = config_file_path()?;
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let default = Config::default();
        let contents = toml::to_string_pretty(&default)?;
        fs::write(&path, contents)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_weights() {
        let config = Config::default();
        assert_eq!(config.weight_size, 2.0);
        assert_eq!(config.weight_days, 0.01);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("exclude = [\"Microsoft*\"]").unwrap();
        assert_eq!(config.weight_size, 2.0);
        assert_eq!(config.weight_days, 0.01);
        assert_eq!(config.exclude, vec!["Microsoft*".to_string()]);
    }

    #[test]
    fn append_exclude_ignores_duplicates() {
        let mut config = Config::default();
        config.append_exclude("Steam*".to_string());
        config.append_exclude("Steam*".to_string());
        assert_eq!(config.exclude.len(), 1);
    }

    #[test]
    fn compiled_excludes_match_names() {
        let mut config = Config::default();
        config.append_exclude("Microsoft*".to_string());
        let set = config.compile_excludes().unwrap().unwrap();
        assert!(set.is_match("Microsoft Teams"));
        assert!(!set.is_match("Blender"));
    }
}
