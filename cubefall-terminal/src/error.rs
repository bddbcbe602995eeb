/// Errors surfaced by the terminal binaries
use std::io;
use std::path::PathBuf;

use cubefall_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_from_core() {
        let err: AppError = CoreError::Precondition("gravity must be negative, got 0".into()).into();
        assert!(matches!(err, AppError::Core(_)));
        assert_eq!(
            err.to_string(),
            "precondition violated: gravity must be negative, got 0"
        );
    }

    #[test]
    fn config_read_display() {
        let err = AppError::ConfigRead {
            path: PathBuf::from("/tmp/missing.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read config /tmp/missing.toml: no such file"
        );
    }
}
