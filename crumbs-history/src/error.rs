use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum HistoryError {
    #[error("Index {index} is out of range for history with {len} states")]
    IndexOutOfRange { index: usize, len: usize },
}
