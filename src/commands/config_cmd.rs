use std::path::Path;
use std::process::Command;

use crate::config::{Config, config_file_path, ensure_config_file};
use crate::error::AppError;
use crate::utils::display_path;

pub struct ConfigOptions {
    pub show_path: bool,
    pub edit: bool,
    pub add_exclude: Option<String>,
    pub set_weight_size: Option<f64>,
    pub set_weight_days: Option<f64>,
}

pub fn execute_config(options: ConfigOptions) -> Result<(), AppError> {
    if options.show_path {
        let path = config_file_path()?;
        println!("Configuration file: {}", display_path(&path));
    }

    let mut changed = false;
    let mut config = Config::load()?;

    if let Some(ref pattern) = options.add_exclude {
        config.append_exclude(pattern.clone());
        println!("Added exclude pattern '{}'.", pattern);
        changed = true;
    }

    if let Some(weight) = options.set_weight_size {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::config("weight_size must be a non-negative number"));
        }
        config.weight_size = weight;
        println!("Set weight_size to {weight}.");
        changed = true;
    }

    if let Some(weight) = options.set_weight_days {
        if !weight.is_finite() || weight < 0.0 {
            return Err(AppError::config("weight_days must be a non-negative number"));
        }
        config.weight_days = weight;
        println!("Set weight_days to {weight}.");
        changed = true;
    }

    if changed {
        config.save()?;
    }

    if options.edit {
        let path = ensure_config_file()?;
        open_editor(&path)?;
    }

    if !options.show_path && !changed && !options.edit {
        let path = config_file_path()?;
        println!("Configuration file: {}", display_path(&path));
    }

    Ok(())
}

fn open_editor(path: &Path) -> Result<(), AppError> {
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| "nano".to_string());

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|err| AppError::Editor(err.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::Editor(format!("Editor exited with status {}", status)))
    }
}
