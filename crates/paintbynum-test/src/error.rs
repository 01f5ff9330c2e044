//! Errors from fixtures and regression output

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestError {
    /// A display-mode image could not be written to `tests/regout`
    #[error("cannot write regression output '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// A synthetic image could not be built
    #[error("cannot build fixture: {0}")]
    Fixture(#[from] paintbynum_core::Error),
}

pub type TestResult<T> = Result<T, TestError>;
