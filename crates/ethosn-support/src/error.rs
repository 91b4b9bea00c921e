//! Accumulating validation error.

use std::ops::{Add, AddAssign};
use thiserror::Error;

/// Zero or more validation failures.
///
/// An empty value means success. Every extraction and conversion returns
/// one of these, and callers fold each of them into a running total so a
/// single translation reports every defect it finds. Messages keep the
/// order in which they were combined.
///
/// ```
/// use ethosn_support::EthosnError;
///
/// let mut err = EthosnError::new();
/// err += EthosnError::msg("stride size=3, stride size must = 2");
/// err += EthosnError::new();
/// err += EthosnError::msg("batch size=2, batch size must = 1");
///
/// assert!(err.has_errors());
/// assert_eq!(err.messages().len(), 2);
/// ```
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct EthosnError {
    messages: Vec<String>,
}

impl EthosnError {
    /// No failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single failure.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Messages of `self` followed by messages of `other`.
    pub fn combine(mut self, other: EthosnError) -> Self {
        self.absorb(other);
        self
    }

    /// Append every message of `other`.
    pub fn absorb(&mut self, other: EthosnError) {
        self.messages.extend(other.messages);
    }

    /// Whether at least one failure was recorded.
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), EthosnError> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl Add for EthosnError {
    type Output = EthosnError;

    fn add(self, rhs: EthosnError) -> EthosnError {
        self.combine(rhs)
    }
}

impl AddAssign for EthosnError {
    fn add_assign(&mut self, rhs: EthosnError) {
        self.absorb(rhs);
    }
}

impl From<ethosn_ir::IrError> for EthosnError {
    fn from(err: ethosn_ir::IrError) -> Self {
        EthosnError::msg(err.to_string())
    }
}
