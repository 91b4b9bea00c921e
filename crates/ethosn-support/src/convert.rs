//! Convert IR shapes, attributes and types into descriptor values.
//!
//! Each converter writes its result into `out` and returns the failures it
//! found. They are independent so several defects in one operator are all
//! reported.

use crate::EthosnError;
use crate::descriptor::{DataFormat, DataType, Padding, QuantizationInfo, Stride, TensorShape};
use crate::extract::as_array;
use ethosn_ir::IndexExpr;

/// Tensor shape with a mandatory unit batch.
///
/// The shape is still written when the batch check fails.
pub fn tensor_shape(shape: &[IndexExpr], out: &mut TensorShape) -> EthosnError {
    let mut err = as_array(shape, out);
    if out[0] != 1 {
        err += EthosnError::msg(format!("batch size={}, batch size must = 1", out[0]));
    }
    err
}

/// Flat padding attribute.
///
/// - 1 entry: the same margin on every side
/// - 2 entries: (height, width)
/// - 4 entries: (top, left, bottom, right)
pub fn padding(padding: &[IndexExpr], out: &mut Padding) -> EthosnError {
    if !matches!(padding.len(), 1 | 2 | 4) {
        return EthosnError::msg(format!(
            "padding tuple size={}, padding tuple size must be {{1, 2, 4}}",
            padding.len()
        ));
    }
    let mut dim = [0u32; 4];
    let err = as_array(padding, &mut dim);
    if err.has_errors() {
        return err;
    }
    *out = match padding.len() {
        1 => Padding::new(dim[0], dim[0], dim[0], dim[0]),
        2 => Padding::new(dim[0], dim[0], dim[1], dim[1]),
        _ => Padding::new(dim[0], dim[2], dim[1], dim[3]),
    };
    EthosnError::new()
}

/// Per-axis (before, after) padding in NHWC order.
///
/// Only the height and width pairs are kept; batch and channel padding are
/// ignored.
pub fn padding_from_pad_width(pad_width: &[Vec<IndexExpr>], out: &mut Padding) -> EthosnError {
    if pad_width.len() != 4 {
        return EthosnError::msg(format!(
            "padding tuple size={}, padding tuple size must = 4",
            pad_width.len()
        ));
    }
    let (height, width) = (&pad_width[1], &pad_width[2]);
    if height.len() != 2 || width.len() != 2 {
        return EthosnError::msg(format!(
            "padding pair sizes=({}, {}), padding pairs must have size 2",
            height.len(),
            width.len()
        ));
    }
    let reduced = [
        height[0].clone(),
        height[1].clone(),
        width[0].clone(),
        width[1].clone(),
    ];
    let mut dim = [0u32; 4];
    let err = as_array(&reduced, &mut dim);
    if err.has_errors() {
        return err;
    }
    *out = Padding::new(dim[0], dim[1], dim[2], dim[3]);
    EthosnError::new()
}

/// Stride pair given as (height, width).
///
/// The descriptor stores the horizontal stride first, so the pair is
/// swapped.
pub fn stride(strides: &[IndexExpr], out: &mut Stride) -> EthosnError {
    if strides.len() != 2 {
        return EthosnError::msg(format!(
            "stride size={}, stride size must = 2",
            strides.len()
        ));
    }
    let mut dim = [0u32; 4];
    let err = as_array(strides, &mut dim);
    if err.has_errors() {
        return err;
    }
    *out = Stride::new(dim[1], dim[0]);
    EthosnError::new()
}

/// Layout name.
pub fn data_format(name: &str, out: &mut DataFormat) -> EthosnError {
    match name.parse() {
        Ok(format) => {
            *out = format;
            EthosnError::new()
        }
        Err(_) => EthosnError::msg(format!(
            "format={name}, format must be {{NCHW, NHWC, HWIO, HWIM}}"
        )),
    }
}

/// Element type. Only scalar `uint8` and `int32` are accepted.
pub fn data_type(dtype: &ethosn_ir::DataType, out: &mut DataType) -> EthosnError {
    if dtype.is_scalar() {
        if dtype.is_uint() && dtype.bits == 8 {
            *out = DataType::Uint8Quantized;
            return EthosnError::new();
        }
        if dtype.is_int() && dtype.bits == 32 {
            *out = DataType::Int32Quantized;
            return EthosnError::new();
        }
    }
    EthosnError::msg(format!(
        "dtype='{dtype}', dtype must be either uint8 or int32"
    ))
}

/// Quantization parameters, copied verbatim.
pub fn quantization_info(zero_point: i32, scale: f32, out: &mut QuantizationInfo) -> EthosnError {
    *out = QuantizationInfo::new(zero_point, scale);
    EthosnError::new()
}
