//! Offset/limit pagination for the listing endpoints.

use crate::errors::ServiceError;

/// Offset/limit window over an ordered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// rows to skip
    pub offset: u64,
    /// rows to return, at least 1
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Build from optional query parameters, falling back to `offset = 0` and `default_limit`.
    pub fn from_query(offset: Option<u64>, limit: Option<u64>, default_limit: u64) -> Self {
        Self { offset: offset.unwrap_or(0), limit: limit.unwrap_or(default_limit) }
    }

    /// The driver binds offset and limit as signed 64-bit integers.
    pub const MAX_VALUE: u64 = i64::MAX as u64;

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.limit == 0 {
            return Err(ServiceError::Validation("limit must be >= 1".into()));
        }
        if self.limit > Self::MAX_VALUE {
            return Err(ServiceError::Validation(format!("limit must be <= {}", Self::MAX_VALUE)));
        }
        if self.offset > Self::MAX_VALUE {
            return Err(ServiceError::Validation(format!("offset must be <= {}", Self::MAX_VALUE)));
        }
        Ok(())
    }
}

impl Default for Page {
    fn default() -> Self { Self { offset: 0, limit: Self::DEFAULT_LIMIT } }
}
