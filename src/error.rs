use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FreeError {
    #[error("magnitude out of range: {exponent} (largest suffix index is {max})")]
    MagnitudeOutOfRange { exponent: usize, max: usize },
    #[error("unit {0} is too large for a 64-bit byte count")]
    UnsupportedUnit(String),
    #[error("config error in {path}: {detail}")]
    Config { path: PathBuf, detail: String },
}
