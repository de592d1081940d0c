use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("node {index} is out of range for a network of {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },
    #[error("invalid node count {count}: expected between 1 and {max}")]
    InvalidNodeCount { count: usize, max: usize },
    #[error("road from node {0} to itself is not allowed")]
    SelfLoop(usize),
    #[error("distance matrix row {row} has {found} entries, expected {expected}")]
    MatrixShape {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Fails with [`Error::NodeOutOfRange`] unless `index < len`.
    pub(crate) fn check_node(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::NodeOutOfRange { index, len })
        }
    }
}
