use std::io::{self, IsTerminal};
use std::path::PathBuf;

use modelref::color::ColorMode;
use modelref::config::read_config;
use modelref::die;
use modelref::registry::populate::{populated_aliases, populated_registry};
use modelref::registry::{AliasTable, Registry};

use crate::{OutputFormat, RequestedColorMode};
use list::table::IntoTable;

pub(crate) mod list;
pub(crate) mod resolve;

/// Returns whether ANSI color should be used
/// If the user has specified a preference, this is honored. This preference
/// can be specified through the command line or the "NO_COLOR" environment
/// variable. If the user hasn't stated a preference, color is enabled if
/// stderr is a terminal.
pub(crate) fn resolve_color_mode(cm: RequestedColorMode) -> ColorMode {
    match cm {
        RequestedColorMode::Auto => {
            let disable_color =
                std::env::var_os("NO_COLOR").is_some() || !io::stderr().is_terminal();

            if disable_color {
                ColorMode::Off
            } else {
                ColorMode::On
            }
        }
        RequestedColorMode::On => ColorMode::On,
        RequestedColorMode::Off => ColorMode::Off,
    }
}

/// Load the configuration and build the registry and alias table from it
pub(crate) fn load(config: Option<PathBuf>) -> (Registry, AliasTable) {
    let config = match read_config(config) {
        Ok(config) => config,
        Err(err) => die!("{}", err),
    };

    let registry = match populated_registry(&config) {
        Ok(registry) => registry,
        Err(err) => die!("invalid model in config: {}", err),
    };

    let aliases = populated_aliases(&config, &registry);

    (registry, aliases)
}

pub(crate) fn format_output<O: IntoTable + serde::Serialize>(object: O, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&object) {
            Ok(output) => println!("{}", output),
            Err(err) => die!("failed to serialize output: {}", err),
        },
        OutputFormat::Table => {
            let tab = object.into_table();

            print!("{}", tab);
        }
        OutputFormat::HeaderlessTable => {
            let mut tab = object.into_table();

            tab.print_header(false);

            print!("{}", tab);
        }
    }
}
