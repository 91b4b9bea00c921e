//! Support-library descriptor values.
//!
//! These are the structures the capability oracle consumes. They are plain
//! values, built fresh for each query.

use std::fmt;
use std::str::FromStr;

/// Four tensor dimensions in descriptor order.
pub type TensorShape = [u32; 4];

/// Element encodings the NPU accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    #[default]
    Uint8Quantized,
    Int32Quantized,
}

/// Tensor memory layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    Nchw,
    #[default]
    Nhwc,
    Hwio,
    Hwim,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Nchw => "NCHW",
            DataFormat::Nhwc => "NHWC",
            DataFormat::Hwio => "HWIO",
            DataFormat::Hwim => "HWIM",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NCHW" => Ok(DataFormat::Nchw),
            "NHWC" => Ok(DataFormat::Nhwc),
            "HWIO" => Ok(DataFormat::Hwio),
            "HWIM" => Ok(DataFormat::Hwim),
            other => Err(format!("unknown data format '{other}'")),
        }
    }
}

/// Affine quantization of a tensor: `real = scale * (q - zero_point)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationInfo {
    pub zero_point: i32,
    pub scale: f32,
}

impl QuantizationInfo {
    pub fn new(zero_point: i32, scale: f32) -> Self {
        Self { zero_point, scale }
    }
}

impl Default for QuantizationInfo {
    fn default() -> Self {
        Self::new(0, 1.0)
    }
}

/// Full description of one tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorInfo {
    pub shape: TensorShape,
    pub data_type: DataType,
    pub data_format: DataFormat,
    pub quantization_info: QuantizationInfo,
}

impl TensorInfo {
    pub fn new(
        shape: TensorShape,
        data_type: DataType,
        data_format: DataFormat,
        quantization_info: QuantizationInfo,
    ) -> Self {
        Self {
            shape,
            data_type,
            data_format,
            quantization_info,
        }
    }
}

impl Default for TensorInfo {
    fn default() -> Self {
        Self::new(
            [1, 1, 1, 1],
            DataType::default(),
            DataFormat::default(),
            QuantizationInfo::default(),
        )
    }
}

/// Spatial padding margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// Horizontal (`x`) and vertical (`y`) stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    pub x: u32,
    pub y: u32,
}

impl Stride {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Default for Stride {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Convolution-wide settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvolutionInfo {
    pub padding: Padding,
    pub stride: Stride,
    pub output_quantization_info: QuantizationInfo,
}

impl ConvolutionInfo {
    pub fn new(padding: Padding, stride: Stride, output_quantization_info: QuantizationInfo) -> Self {
        Self {
            padding,
            stride,
            output_quantization_info,
        }
    }
}

/// Concatenation axis and output quantization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcatenationInfo {
    pub axis: u32,
    pub output_quantization_info: QuantizationInfo,
}

/// Split axis and segment sizes along it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitInfo {
    pub axis: u32,
    pub sizes: Vec<u32>,
}
