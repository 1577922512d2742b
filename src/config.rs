use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::ModelDescriptor;
use crate::warn;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read config \"{0}\": {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    /// Aliases layered on top of the built-in ones
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Models appended to the built-in catalogue
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

fn get_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME");

    if let Some(home) = home {
        let home = PathBuf::from(home);

        const USER_PATHS: [&str; 2] = [".config/modelref/config.toml", ".modelref.toml"];

        for &path in USER_PATHS.iter() {
            let fullpath = home.join(path);

            if fullpath.exists() {
                return Some(fullpath);
            }
        }
    }

    let system_config = PathBuf::from("/etc/modelref.toml");

    if system_config.exists() {
        Some(system_config)
    } else {
        None
    }
}

/// Dotted paths of every key in `user_config` which `config` does not have
fn extra_fields_helper<'a>(
    path: &mut Vec<&'a str>,
    user_config: &'a toml::Table,
    config: &'a toml::Table,
    extra: &mut Vec<String>,
) {
    for (user_key, user_value) in user_config {
        path.push(user_key.as_str());

        match (user_value, config.get(user_key)) {
            (toml::Value::Table(user_value), Some(toml::Value::Table(config_value))) => {
                extra_fields_helper(path, user_value, config_value, extra)
            }
            (toml::Value::Array(user_values), Some(toml::Value::Array(config_values))) => {
                for (user_value, config_value) in user_values.iter().zip(config_values) {
                    if let (toml::Value::Table(user_value), toml::Value::Table(config_value)) =
                        (user_value, config_value)
                    {
                        extra_fields_helper(path, user_value, config_value, extra)
                    }
                }
            }
            (_, Some(_)) => {}
            (_, None) => extra.push(path.join(".")),
        }

        path.pop();
    }
}

fn extra_fields(config: &Config, raw_config: &str) -> Result<Vec<String>, Error> {
    let user_config: toml::Table = toml::from_str(raw_config)?;

    // Round-trip the typed config so that only recognized keys remain
    let config: toml::Table = match toml::to_string(config) {
        Ok(reserialized) => toml::from_str(&reserialized)?,
        Err(_) => return Ok(Vec::new()),
    };

    let mut path = Vec::new();
    let mut extra = Vec::new();

    extra_fields_helper(&mut path, &user_config, &config, &mut extra);

    Ok(extra)
}

impl Config {
    pub fn parse(raw_config: &str) -> Result<Config, Error> {
        let config: Config = toml::from_str(raw_config)?;

        for key in extra_fields(&config, raw_config)? {
            warn!("config contains extraneous key \"{}\", ignoring", key);
        }

        Ok(config)
    }

    pub fn read(path: &Path) -> Result<Config, Error> {
        let raw_config =
            std::fs::read_to_string(path).map_err(|e| Error::Read(path.to_path_buf(), e))?;

        Config::parse(&raw_config)
    }
}

/// Reads the config at `config`, or the first config found in the default locations.
/// Without either, the default config is returned.
pub fn read_config(config: Option<PathBuf>) -> Result<Config, Error> {
    match config.or_else(get_config_path) {
        Some(path) => Config::read(&path),
        None => Ok(Config::default()),
    }
}
