//! Expression IR consumed by the Ethos-N support layer.
//!
//! This crate models the part of a tensor-compiler IR that the support layer
//! inspects: a closed tree of expressions (`Expr`) whose calls carry an
//! operator identity, typed attribute bundles, and statically resolved
//! checked types. Constants own their backing buffers as raw bytes.
//!
//! # Example
//!
//! ```
//! use ethosn_ir::{builder, DataType, Expr};
//!
//! let data = builder::var("x", &[1, 8, 8, 4], DataType::uint(8));
//! let zero_point = builder::scalar(10i32);
//!
//! assert!(data.as_var().is_some());
//! assert!(matches!(zero_point, Expr::Constant(_)));
//! ```

use thiserror::Error;

pub mod attrs;
pub mod builder;
pub mod expr;
pub mod types;

pub use attrs::{
    Attrs, ConcatenateAttrs, Conv2DAttrs, IndicesOrSections, PadAttrs, RequantizeAttrs,
    SplitAttrs,
};
pub use expr::{Call, Constant, Expr, Op, Tuple, Var};
pub use types::{DataType, Element, IndexExpr, IndexList, NDArray, TensorType, Type, TypeCode};

/// Errors raised while building or reading IR values.
#[derive(Debug, Error)]
pub enum IrError {
    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Empty constant: no scalar to read")]
    EmptyConstant,

    #[error("Scalar type mismatch: constant is '{actual}', requested '{requested}'")]
    ScalarTypeMismatch {
        requested: DataType,
        actual: DataType,
    },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),
}

/// Result type for IR operations.
pub type Result<T> = std::result::Result<T, IrError>;
