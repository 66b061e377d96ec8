use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidPrefix { input: String },
    UnknownTariff { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidPrefix { input } => {
                write!(f, "invalid default prefix: {input} (expected `+` and digits)")
            }
            Self::UnknownTariff { input } => write!(f, "unknown tariff id: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
