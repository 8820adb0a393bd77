use std::fmt;

use thiserror::Error;

/// Which key space of a [`DoubleMap`](crate::DoubleMap) an operation collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("key not found")]
    NotFound,
    #[error("{0} key is already present")]
    DuplicateKey(Side),
    #[error("value is mapped from more than one key")]
    DuplicateValue,
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
