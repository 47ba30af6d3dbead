use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Tile counts impossible with the physical supply, or a wrong total count
    MalformedHand { reason: String },
    /// Contradictory evaluation context (a bug in the caller)
    InvalidContext { reason: String },
    /// Tile / hand expression could not be parsed
    Parse { input: String, message: String },
}

impl EvalError {
    pub fn parse(input: &str, message: &str) -> Self {
        EvalError::Parse {
            input: input.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::MalformedHand { reason } => write!(f, "Malformed hand: {}", reason),
            EvalError::InvalidContext { reason } => write!(f, "Invalid context: {}", reason),
            EvalError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;
