use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use ips_builder::{Layout, LayoutOverrides};

/// Read next to the base image when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "patches.toml";

#[derive(Debug, Parser)]
#[command(name = "build-patches", version, about = "Assemble IPS patches against a base ROM")]
pub struct Opts {
    /// Directory containing `resources/`. Defaults to the directory of this executable.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// TOML file overriding the default file locations.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stop at the first assembler or patch tool failure.
    #[arg(long)]
    pub strict: bool,

    /// Copy the finished patches into this directory.
    #[arg(long, value_name = "DIR")]
    pub copy_to: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not locate the executable. {0}")]
    CurrentExe(std::io::Error),

    #[error("Could not read config file ({}). {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file ({}). {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

fn root_dir(opts: &Opts) -> Result<PathBuf, ConfigError> {
    if let Some(root) = &opts.root {
        return Ok(root.clone());
    }

    let exe = std::env::current_exe().map_err(ConfigError::CurrentExe)?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn read_overrides(path: &Path) -> Result<LayoutOverrides, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_layout(opts: &Opts) -> Result<Layout, ConfigError> {
    let mut layout = Layout::new(root_dir(opts)?.join("resources"));

    let config_file = match &opts.config {
        Some(path) => Some(path.clone()),
        None => {
            let path = layout.resources.join(DEFAULT_CONFIG_FILE);
            path.is_file().then_some(path)
        }
    };

    if let Some(path) = config_file {
        tracing::debug!("Reading config from {}", path.display());
        layout.apply(read_overrides(&path)?);
    }

    Ok(layout)
}
