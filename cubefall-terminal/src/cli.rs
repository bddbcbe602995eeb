/// Command-line options shared by the demo binaries
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use cubefall_core::DemoConfig;

use crate::error::AppError;

#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// TOML file overriding the default demo settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible cube spawning
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Read and validate the config file, or fall back to defaults
pub fn load_config(path: Option<&Path>) -> Result<DemoConfig, AppError> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = DemoConfig::from_toml_str(&text)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Log to stderr; the alternate screen lives on stdout, so `2>file` keeps
/// the output readable.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::parse_from(["cubefall", "--config", "demo.toml", "--seed", "42"]);
        assert_eq!(args.config, Some(PathBuf::from("demo.toml")));
        assert_eq!(args.seed, Some(42));

        let bare = Args::parse_from(["cubefall"]);
        assert!(bare.config.is_none());
        assert!(bare.seed.is_none());
    }

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), DemoConfig::default());
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
