//! Quantized concatenation.
//!
//! Expected call shape:
//!
//! ```text
//! qnn.concatenate((data..), (input_scales..), (input_zps..), output_scale, output_zp)
//! ```

use super::{call_attrs, match_call};
use crate::EthosnError;
use crate::convert;
use crate::descriptor::{ConcatenationInfo, DataFormat, DataType, QuantizationInfo, TensorInfo};
use crate::extract::as_constant;
use ethosn_ir::{ConcatenateAttrs, Expr, Op, Type};

#[derive(Debug, Clone, Default)]
pub struct ConcatenateParams {
    /// One entry per input, in tuple order.
    pub input_infos: Vec<TensorInfo>,
    pub concat_info: ConcatenationInfo,
}

/// Translate a quantized concatenation into `params`.
pub fn concatenate(expr: &Expr, params: &mut ConcatenateParams) -> EthosnError {
    let call = match match_call(expr, &Op::QnnConcatenate, 5) {
        Ok(call) => call,
        Err(err) => return err,
    };
    let mut err = EthosnError::new();

    match call_attrs::<ConcatenateAttrs>(call) {
        Ok(attrs) => match u32::try_from(attrs.axis) {
            Ok(axis) => params.concat_info.axis = axis,
            Err(_) => {
                err += EthosnError::msg(format!("axis={}, axis must be >= 0", attrs.axis));
            }
        },
        Err(e) => err += e,
    }

    let mut output_scale = 1.0f32;
    let mut output_zero_point = 0i32;
    err += as_constant(&call.args[3], &mut output_scale);
    err += as_constant(&call.args[4], &mut output_zero_point);
    params.concat_info.output_quantization_info =
        QuantizationInfo::new(output_zero_point, output_scale);

    let input_types = call.args[0].checked_type();
    let (Some(input_types), Some(input_scales), Some(input_zero_points)) = (
        input_types.as_ref().and_then(Type::as_tuple),
        call.args[1].as_tuple(),
        call.args[2].as_tuple(),
    ) else {
        err += EthosnError::msg(
            "expected tuples of input tensors, input scales and input zero points",
        );
        return err;
    };
    let (input_scales, input_zero_points) = (&input_scales.fields, &input_zero_points.fields);
    if input_types.len() != input_scales.len() || input_scales.len() != input_zero_points.len() {
        err += EthosnError::msg(format!(
            "inputs={}, scales={}, zero points={}, counts must match",
            input_types.len(),
            input_scales.len(),
            input_zero_points.len()
        ));
    }

    for ((input_type, input_scale), input_zero_point) in
        input_types.iter().zip(input_scales).zip(input_zero_points)
    {
        let mut scale = 1.0f32;
        let mut zero_point = 0i32;
        err += as_constant(input_scale, &mut scale);
        err += as_constant(input_zero_point, &mut zero_point);

        let mut shape = [1u32; 4];
        let mut data_type = DataType::default();
        match input_type.as_tensor() {
            Some(tensor) => {
                err += convert::tensor_shape(&tensor.shape, &mut shape);
                err += convert::data_type(&tensor.dtype, &mut data_type);
            }
            None => err += EthosnError::msg("expected tensor type for concatenate input"),
        }
        params.input_infos.push(TensorInfo::new(
            shape,
            data_type,
            DataFormat::Nhwc,
            QuantizationInfo::new(zero_point, scale),
        ));
    }

    err
}
