use std::fmt;

/// Failures that end a CLI run. Details are reported through the ui before
/// the error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    InputError,
    ConfigError,
    FilterError,
    PresetError,
    PricingError,
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InputError => 2,
            CliError::ConfigError => 3,
            CliError::FilterError => 4,
            CliError::PresetError => 5,
            CliError::PricingError => 6,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputError => write!(f, "input error"),
            CliError::ConfigError => write!(f, "config error"),
            CliError::FilterError => write!(f, "filter error"),
            CliError::PresetError => write!(f, "preset error"),
            CliError::PricingError => write!(f, "pricing error"),
        }
    }
}

impl std::error::Error for CliError {}
