use thiserror::Error;

use crate::{
    application::render::RenderConfigError, config::LoadError, infra::error::InfraError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    RenderConfig(#[from] RenderConfigError),
}

impl AppError {
    /// Process exit status reported by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Infra(_) | AppError::RenderConfig(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_exit_with_usage_status() {
        let error = AppError::from(LoadError::Invalid {
            key: "logging.level",
            reason: "failed to parse".to_string(),
        });

        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().starts_with("failed to load configuration"));
    }

    #[test]
    fn io_errors_exit_with_failure_status() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.md");
        let error = AppError::from(InfraError::from(io));

        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "io error: missing.md");
    }
}
