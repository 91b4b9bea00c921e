//! Quantized 2D convolution.
//!
//! Expected call shape:
//!
//! ```text
//! qnn.requantize(
//!     nn.bias_add(
//!         qnn.conv2d(data | nn.pad(data), weight, input_zp, kernel_zp, input_scale, kernel_scale),
//!         bias),
//!     _, _, output_scale, output_zp)
//! ```

use super::{call_attrs, match_call, tensor_type_of};
use crate::EthosnError;
use crate::convert;
use crate::descriptor::{
    ConvolutionInfo, DataFormat, DataType, Padding, QuantizationInfo, Stride, TensorInfo,
};
use crate::extract::as_constant;
use ethosn_ir::{Call, Conv2DAttrs, Expr, IndexExpr, IndexList, Op, PadAttrs};

/// Everything the oracle needs to judge one convolution.
#[derive(Debug, Clone, Default)]
pub struct ConvolutionParams<'a> {
    pub activation_info: TensorInfo,
    pub weights_info: TensorInfo,
    pub bias_info: TensorInfo,
    pub conv_info: ConvolutionInfo,
    /// Weight bytes, borrowed from the IR constant.
    pub raw_weights: Option<&'a [u8]>,
    /// Bias bytes, borrowed from the IR constant.
    pub raw_bias: Option<&'a [u8]>,
    pub is_depthwise: bool,
}

struct ConvPattern<'a> {
    requantize: &'a Call,
    bias_add: &'a Call,
    conv: &'a Call,
    pad: Option<&'a Call>,
    attrs: &'a Conv2DAttrs,
}

fn match_pattern(expr: &Expr) -> Result<ConvPattern<'_>, EthosnError> {
    let requantize = match_call(expr, &Op::QnnRequantize, 5)?;
    let bias_add = match_call(&requantize.args[0], &Op::BiasAdd, 2)?;
    let conv = match_call(&bias_add.args[0], &Op::QnnConv2d, 6)?;
    let attrs = call_attrs::<Conv2DAttrs>(conv)?;
    let pad = conv.args[0]
        .as_call()
        .filter(|call| call.op == Op::Pad && !call.args.is_empty());
    Ok(ConvPattern {
        requantize,
        bias_add,
        conv,
        pad,
        attrs,
    })
}

/// Depthwise iff the declared channel count equals the group count and
/// that count is not 1.
fn is_depthwise(attrs: &Conv2DAttrs) -> bool {
    attrs
        .channels
        .as_ref()
        .is_some_and(|channels| *channels == IndexExpr::Int(attrs.groups))
        && attrs.groups != 1
}

/// Translate a quantized convolution into `params`.
pub fn qnn_conv2d<'a>(expr: &'a Expr, params: &mut ConvolutionParams<'a>) -> EthosnError {
    let ConvPattern {
        requantize,
        bias_add,
        conv,
        pad,
        attrs,
    } = match match_pattern(expr) {
        Ok(pattern) => pattern,
        Err(err) => return err,
    };

    // Quantization parameters
    let mut input_zero_point = 0i32;
    let mut kernel_zero_point = 0i32;
    let mut output_zero_point = 0i32;
    let mut input_scale = 1.0f32;
    let mut kernel_scale = 1.0f32;
    let mut output_scale = 1.0f32;
    let mut err = as_constant(&conv.args[2], &mut input_zero_point);
    err += as_constant(&conv.args[3], &mut kernel_zero_point);
    err += as_constant(&requantize.args[4], &mut output_zero_point);
    err += as_constant(&conv.args[4], &mut input_scale);
    err += as_constant(&conv.args[5], &mut kernel_scale);
    err += as_constant(&requantize.args[3], &mut output_scale);

    let mut data_q_info = QuantizationInfo::default();
    let mut weights_q_info = QuantizationInfo::default();
    let mut bias_q_info = QuantizationInfo::default();
    let mut output_q_info = QuantizationInfo::default();
    err += convert::quantization_info(input_zero_point, input_scale, &mut data_q_info);
    err += convert::quantization_info(kernel_zero_point, kernel_scale, &mut weights_q_info);
    err += convert::quantization_info(
        0,
        data_q_info.scale * weights_q_info.scale,
        &mut bias_q_info,
    );
    err += convert::quantization_info(output_zero_point, output_scale, &mut output_q_info);

    // Padding comes from the standalone pad or the attribute, never both.
    let mut padding = Padding::default();
    if let Some(pad) = pad {
        let _ = convert::padding(&attrs.padding, &mut padding);
        if padding != Padding::default() {
            err += EthosnError::msg(
                "both op and attr padding exist, must be either op/attr only or no padding",
            );
        }
        match call_attrs::<PadAttrs>(pad) {
            Ok(pad_attrs) => {
                err += convert::padding_from_pad_width(&pad_attrs.pad_width, &mut padding);
            }
            Err(e) => err += e,
        }
    } else {
        err += convert::padding(&attrs.padding, &mut padding);
    }

    let mut stride = Stride::default();
    err += convert::stride(&attrs.strides, &mut stride);

    let mut dilation = [1u32; 4];
    let _ = crate::extract::as_array(&attrs.dilation, &mut dilation);
    if attrs.dilation.len() != 2 || dilation[0] != 1 || dilation[1] != 1 {
        err += EthosnError::msg(format!(
            "dilation={}, dilation must = [1, 1]",
            IndexList(&attrs.dilation)
        ));
    }
    params.conv_info = ConvolutionInfo::new(padding, stride, output_q_info);

    // Activation
    let data = pad.map_or(&conv.args[0], |pad| &pad.args[0]);
    let mut activation_shape = [1u32; 4];
    let mut activation_type = DataType::default();
    match tensor_type_of(data, "convolution input") {
        Ok(data_type) => {
            err += convert::tensor_shape(&data_type.shape, &mut activation_shape);
            err += convert::data_type(&data_type.dtype, &mut activation_type);
        }
        Err(e) => err += e,
    }
    params.activation_info = TensorInfo::new(
        activation_shape,
        activation_type,
        DataFormat::Nhwc,
        data_q_info,
    );

    // Weights
    params.is_depthwise = is_depthwise(attrs);
    let mut weights_shape = [1u32; 4];
    let mut weights_type = DataType::default();
    let mut weights_format = DataFormat::default();
    match tensor_type_of(&conv.args[1], "convolution weights") {
        Ok(weights) => {
            // Weights have no batch axis, so the unit-batch check does not apply.
            let _ = convert::tensor_shape(&weights.shape, &mut weights_shape);
            err += convert::data_type(&weights.dtype, &mut weights_type);
        }
        Err(e) => err += e,
    }
    let kernel_layout = if params.is_depthwise { "HWIM" } else { "HWIO" };
    err += convert::data_format(kernel_layout, &mut weights_format);
    params.weights_info = TensorInfo::new(
        weights_shape,
        weights_type,
        weights_format,
        weights_q_info,
    );
    params.raw_weights = conv.args[1]
        .as_constant()
        .map(|constant| constant.data.as_bytes());

    // Bias
    let bias_channels = if params.is_depthwise {
        weights_shape[2]
    } else {
        weights_shape[3]
    };
    params.bias_info = TensorInfo::new(
        [1, 1, 1, bias_channels],
        DataType::Int32Quantized,
        DataFormat::Nhwc,
        bias_q_info,
    );
    params.raw_bias = bias_add.args[1]
        .as_constant()
        .map(|constant| constant.data.as_bytes());

    err
}
