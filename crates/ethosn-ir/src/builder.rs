//! Construct the quantized call shapes the support layer inspects.
//!
//! These helpers build expressions with the argument order each operator
//! expects:
//!
//! ```text
//! qnn.conv2d(data, weight, input_zp, kernel_zp, input_scale, kernel_scale)
//! nn.bias_add(data, bias)
//! qnn.requantize(data, input_scale, input_zp, output_scale, output_zp)
//! qnn.concatenate((data..), (scales..), (zero_points..), output_scale, output_zp)
//! split(data)
//! nn.pad(data, pad_value)
//! ```
//!
//! Calls are built untyped; use `Expr::with_checked_type` where a consumer
//! reads a call's type.

use crate::Result;
use crate::attrs::{
    Attrs, ConcatenateAttrs, Conv2DAttrs, IndicesOrSections, PadAttrs, RequantizeAttrs,
    SplitAttrs,
};
use crate::expr::{Call, Constant, Expr, Op, Tuple, Var};
use crate::types::{DataType, Element, NDArray, TensorType, Type};

/// A free tensor variable.
pub fn var(name: &str, shape: &[i64], dtype: DataType) -> Expr {
    Expr::Var(Var {
        name: name.to_string(),
        type_annotation: Type::Tensor(TensorType::new(shape, dtype)),
    })
}

/// A rank-0 constant.
pub fn scalar<T: Element>(value: T) -> Expr {
    Expr::Constant(Constant {
        data: NDArray::scalar(value),
    })
}

/// A dense constant of the given shape.
pub fn constant<T: Element>(values: &[T], shape: &[i64]) -> Result<Expr> {
    Ok(Expr::Constant(Constant {
        data: NDArray::from_slice(values, shape.to_vec())?,
    }))
}

pub fn tuple(fields: Vec<Expr>) -> Expr {
    Expr::Tuple(Tuple { fields })
}

pub fn call(op: Op, args: Vec<Expr>, attrs: Attrs) -> Expr {
    Expr::Call(Call::new(op, args, attrs))
}

/// `nn.pad` with a zero pad value.
pub fn pad(data: Expr, pad_width: &[[i64; 2]]) -> Expr {
    call(
        Op::Pad,
        vec![data, scalar(0i32)],
        Attrs::Pad(PadAttrs::new(pad_width)),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn qnn_conv2d(
    data: Expr,
    weight: Expr,
    input_zero_point: i32,
    kernel_zero_point: i32,
    input_scale: f32,
    kernel_scale: f32,
    attrs: Conv2DAttrs,
) -> Expr {
    call(
        Op::QnnConv2d,
        vec![
            data,
            weight,
            scalar(input_zero_point),
            scalar(kernel_zero_point),
            scalar(input_scale),
            scalar(kernel_scale),
        ],
        Attrs::Conv2D(attrs),
    )
}

pub fn bias_add(data: Expr, bias: Expr) -> Expr {
    call(Op::BiasAdd, vec![data, bias], Attrs::None)
}

pub fn requantize(
    data: Expr,
    input_scale: f32,
    input_zero_point: i32,
    output_scale: f32,
    output_zero_point: i32,
) -> Expr {
    call(
        Op::QnnRequantize,
        vec![
            data,
            scalar(input_scale),
            scalar(input_zero_point),
            scalar(output_scale),
            scalar(output_zero_point),
        ],
        Attrs::Requantize(RequantizeAttrs::default()),
    )
}

/// `qnn.concatenate` with one (scale, zero point) pair per input.
pub fn qnn_concatenate(
    inputs: Vec<Expr>,
    quantization: &[(f32, i32)],
    output_scale: f32,
    output_zero_point: i32,
    axis: i64,
) -> Expr {
    let scales = quantization.iter().map(|&(s, _)| scalar(s)).collect();
    let zero_points = quantization.iter().map(|&(_, zp)| scalar(zp)).collect();
    call(
        Op::QnnConcatenate,
        vec![
            tuple(inputs),
            tuple(scales),
            tuple(zero_points),
            scalar(output_scale),
            scalar(output_zero_point),
        ],
        Attrs::Concatenate(ConcatenateAttrs { axis }),
    )
}

pub fn split(data: Expr, indices_or_sections: IndicesOrSections, axis: i64) -> Expr {
    call(
        Op::Split,
        vec![data],
        Attrs::Split(SplitAttrs {
            indices_or_sections,
            axis,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conv_argument_order() {
        let data = var("x", &[1, 8, 8, 4], DataType::uint(8));
        let weight = constant(&[0u8; 9 * 4 * 8], &[3, 3, 4, 8]).unwrap();
        let conv = qnn_conv2d(data, weight, 10, 0, 0.5, 0.1, Conv2DAttrs::default());

        let call = conv.as_call().unwrap();
        assert_eq!(call.op, Op::QnnConv2d);
        assert_eq!(call.args.len(), 6);
        let zp = call.args[2].as_constant().unwrap();
        assert_eq!(zp.data.read_scalar::<i32>().unwrap(), 10);
        let scale = call.args[5].as_constant().unwrap();
        assert_eq!(scale.data.read_scalar::<f32>().unwrap(), 0.1);
    }

    #[test]
    fn test_concatenate_tuples() {
        let inputs = vec![
            var("a", &[1, 4, 4, 2], DataType::uint(8)),
            var("b", &[1, 4, 4, 3], DataType::uint(8)),
        ];
        let concat = qnn_concatenate(inputs, &[(0.5, 1), (0.25, 2)], 1.0, 0, 3);

        let call = concat.as_call().unwrap();
        assert_eq!(call.args[0].as_tuple().unwrap().fields.len(), 2);
        assert_eq!(call.args[1].as_tuple().unwrap().fields.len(), 2);
        assert_eq!(call.attrs.as_concatenate().unwrap().axis, 3);
    }

    #[test]
    fn test_constant_shape_checked() {
        assert!(constant(&[1i32, 2, 3], &[2, 2]).is_err());
    }
}
