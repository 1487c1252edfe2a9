//! Application-level error carried to the binary's exit code.
//!
//! Exit codes: 2 for input/argument/IO problems, 4 for training failures.

use crate::data::SynthError;
use crate::fit::TrainError;
use crate::io::LoadError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(2, format!("Error loading data: {err}"))
    }
}

impl From<TrainError> for AppError {
    fn from(err: TrainError) -> Self {
        AppError::new(4, format!("Training failed: {err}"))
    }
}

impl From<SynthError> for AppError {
    fn from(err: SynthError) -> Self {
        AppError::new(2, format!("Synthetic data error: {err}"))
    }
}
