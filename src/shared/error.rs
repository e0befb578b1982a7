#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinError {
    InvalidArgument(String),
    Decode(String),
    Network(String),
    Config(String),
}

impl SkinError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl std::fmt::Display for SkinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::Decode(msg) => write!(f, "Decode error: {msg}"),
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SkinError {}
