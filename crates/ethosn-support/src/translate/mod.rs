//! Operator translators.
//!
//! Each translator decomposes one matched call shape, converts every
//! attribute and quantization parameter it finds, and fills a parameter
//! struct for the capability oracle. Translators never stop at the first
//! defect: all conversions run and their failures are accumulated. Only a
//! call shape that cannot be decomposed at all ends a translation early,
//! since no later step has anything to read.

pub mod concatenate;
pub mod conv2d;
pub mod split;

pub use concatenate::{ConcatenateParams, concatenate};
pub use conv2d::{ConvolutionParams, qnn_conv2d};
pub use split::{SplitParams, split};

use crate::EthosnError;
use crate::descriptor::TensorShape;
use ethosn_ir::{Attrs, Call, Expr, Op, TensorType};

/// Expect `expr` to be a call to `op` with at least `arity` arguments.
pub(crate) fn match_call<'a>(
    expr: &'a Expr,
    op: &Op,
    arity: usize,
) -> Result<&'a Call, EthosnError> {
    let Some(call) = expr.as_call() else {
        return Err(EthosnError::msg(format!("expected call to {op}")));
    };
    if call.op != *op {
        return Err(EthosnError::msg(format!(
            "expected call to {op}, found {}",
            call.op
        )));
    }
    if call.args.len() < arity {
        return Err(EthosnError::msg(format!(
            "{op} expects {arity} arguments, found {}",
            call.args.len()
        )));
    }
    Ok(call)
}

/// The typed attribute bundle of `call`.
pub(crate) fn call_attrs<'a, T>(call: &'a Call) -> Result<&'a T, EthosnError>
where
    &'a T: TryFrom<&'a Attrs, Error = String>,
{
    <&'a T>::try_from(&call.attrs)
        .map_err(|found| EthosnError::msg(format!("expected {} attributes, {found}", call.op)))
}

/// The checked tensor type of `expr`, or a failure naming `what`.
pub(crate) fn tensor_type_of(expr: &Expr, what: &str) -> Result<TensorType, EthosnError> {
    expr.tensor_type()
        .ok_or_else(|| EthosnError::msg(format!("expected tensor type for {what}")))
}

/// Extent of `axis` in a converted shape.
pub(crate) fn axis_extent(shape: &TensorShape, axis: i64) -> Result<u32, EthosnError> {
    usize::try_from(axis)
        .ok()
        .and_then(|i| shape.get(i).copied())
        .ok_or_else(|| {
            EthosnError::msg(format!(
                "axis={axis}, axis must be in [0, {})",
                shape.len()
            ))
        })
}
