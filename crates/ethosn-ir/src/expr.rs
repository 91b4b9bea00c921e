//! Expression tree.
//!
//! The IR is an immutable tree of expressions:
//! - **Var**: a free tensor with an annotated type
//! - **Constant**: a materialized buffer (`NDArray`)
//! - **Tuple**: an ordered group of expressions
//! - **Call**: an operator applied to argument expressions, with attributes
//!
//! Calls carry the checked type computed by upstream type inference. Vars,
//! constants and tuples derive theirs from their contents.

use crate::attrs::Attrs;
use crate::types::{NDArray, TensorType, Type};
use std::fmt;

/// Operator identity of a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    /// `nn.pad`
    Pad,
    /// `nn.bias_add`
    BiasAdd,
    /// `qnn.conv2d`
    QnnConv2d,
    /// `qnn.requantize`
    QnnRequantize,
    /// `qnn.concatenate`
    QnnConcatenate,
    /// `split`
    Split,
    /// Any operator the support layer does not inspect.
    Other(String),
}

impl Op {
    /// Look up an operator by its registered name.
    pub fn get(name: &str) -> Op {
        match name {
            "nn.pad" => Op::Pad,
            "nn.bias_add" => Op::BiasAdd,
            "qnn.conv2d" => Op::QnnConv2d,
            "qnn.requantize" => Op::QnnRequantize,
            "qnn.concatenate" => Op::QnnConcatenate,
            "split" => Op::Split,
            other => Op::Other(other.to_string()),
        }
    }

    /// Registered operator name.
    pub fn name(&self) -> &str {
        match self {
            Op::Pad => "nn.pad",
            Op::BiasAdd => "nn.bias_add",
            Op::QnnConv2d => "qnn.conv2d",
            Op::QnnRequantize => "qnn.requantize",
            Op::QnnConcatenate => "qnn.concatenate",
            Op::Split => "split",
            Op::Other(name) => name,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    pub name: String,
    pub type_annotation: Type,
}

/// A materialized constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub data: NDArray,
}

/// An ordered group of expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub fields: Vec<Expr>,
}

/// An operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Op,
    pub args: Vec<Expr>,
    pub attrs: Attrs,
    /// Result type from type inference, if it has run.
    pub checked_type: Option<Type>,
}

impl Call {
    pub fn new(op: Op, args: Vec<Expr>, attrs: Attrs) -> Self {
        Self {
            op,
            args,
            attrs,
            checked_type: None,
        }
    }
}

/// An IR expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(Var),
    Constant(Constant),
    Tuple(Tuple),
    Call(Call),
}

impl Expr {
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Expr::Var(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Expr::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Expr::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Whether this is a call to `op`.
    pub fn is_call_to(&self, op: &Op) -> bool {
        self.as_call().is_some_and(|call| call.op == *op)
    }

    /// The statically resolved type of this expression.
    ///
    /// Returns `None` for calls that have not been type-checked, and for
    /// tuples containing such a call.
    pub fn checked_type(&self) -> Option<Type> {
        match self {
            Expr::Var(var) => Some(var.type_annotation.clone()),
            Expr::Constant(constant) => Some(Type::Tensor(constant.data.tensor_type())),
            Expr::Tuple(tuple) => tuple
                .fields
                .iter()
                .map(Expr::checked_type)
                .collect::<Option<Vec<_>>>()
                .map(Type::Tuple),
            Expr::Call(call) => call.checked_type.clone(),
        }
    }

    /// The checked type, if it is a tensor type.
    pub fn tensor_type(&self) -> Option<TensorType> {
        match self.checked_type()? {
            Type::Tensor(t) => Some(t),
            Type::Tuple(_) => None,
        }
    }

    /// Attach a checked type. Only calls store one; other variants derive it.
    pub fn with_checked_type(mut self, ty: Type) -> Self {
        if let Expr::Call(call) = &mut self {
            call.checked_type = Some(ty);
        }
        self
    }
}
