use thiserror::Error;

/// Error type for antenna graph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AntennaGraphError {
    #[error("allocation error: {0}")]
    Allocation(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("graph error: {0}")]
    Graph(String),
}

pub type GraphResult<T> = Result<T, AntennaGraphError>;

impl AntennaGraphError {
    pub fn allocation<T: Into<String>>(msg: T) -> Self {
        AntennaGraphError::Allocation(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        AntennaGraphError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AntennaGraphError::NotFound(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        AntennaGraphError::Io(msg.into())
    }

    pub fn graph<T: Into<String>>(msg: T) -> Self {
        AntennaGraphError::Graph(msg.into())
    }
}
