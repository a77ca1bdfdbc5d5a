use std::fmt;
use thiserror::Error;

/// Why a mutation was refused even though its target exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockReason {
    /// Required global attributes stay enabled.
    RequiredGlobal(String),
    /// Predefined attributes cannot be edited or deleted, only toggled.
    SystemAttribute(String),
}

impl fmt::Display for LockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockReason::RequiredGlobal(id) => {
                write!(f, "global attribute {} is required and cannot be disabled", id)
            }
            LockReason::SystemAttribute(id) => {
                write!(f, "attribute {} is predefined and cannot be modified", id)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Attribute {attribute_id} not found in category {category_id}")]
    AttributeNotFound {
        category_id: String,
        attribute_id: String,
    },

    #[error("Global attribute not found: {0}")]
    GlobalAttributeNotFound(String),

    #[error("Locked: {0}")]
    Locked(LockReason),

    /// The highest rank in a list is already `u32::MAX`; nothing can follow it.
    #[error("No rank left after the last entry of {0}")]
    RankExhausted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl SchemaError {
    /// True for the "target id does not resolve" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SchemaError::CategoryNotFound(_)
                | SchemaError::AttributeNotFound { .. }
                | SchemaError::GlobalAttributeNotFound(_)
        )
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, SchemaError::Locked(_))
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
