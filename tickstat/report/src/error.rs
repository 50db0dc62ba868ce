use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid key addressing: a key path needs at least one component")]
    InvalidKeyAddressing,
}
