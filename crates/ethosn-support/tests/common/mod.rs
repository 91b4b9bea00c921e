//! Common test utilities for support-layer tests.
//!
//! Provides subgraph builders for the three supported call shapes and a
//! mock oracle that records every query it receives.

#![allow(dead_code)]

use ethosn_ir::{Conv2DAttrs, DataType, Expr, IndexExpr, IndicesOrSections, builder};
use ethosn_support::SupportOracle;
use ethosn_support::descriptor::{ConcatenationInfo, ConvolutionInfo, SplitInfo, TensorInfo};
use std::sync::Mutex;

/// Install a tracing subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Parameters of a `requantize(bias_add(conv2d(..)))` subgraph.
///
/// The default is a 1x8x8x4 uint8 input, a 3x3 HWIO kernel producing 8
/// channels, attribute padding (1, 1), unit stride and dilation.
#[derive(Debug, Clone)]
pub struct ConvCase {
    pub input_shape: Vec<i64>,
    pub input_dtype: DataType,
    pub kernel_shape: Vec<i64>,
    pub kernel_dtype: DataType,
    pub attrs: Conv2DAttrs,
    /// Insert a standalone `nn.pad` with this width in front of the conv.
    pub pad_width: Option<Vec<[i64; 2]>>,
    pub input_zero_point: i32,
    pub input_scale: f32,
    pub kernel_zero_point: i32,
    pub kernel_scale: f32,
    pub output_zero_point: i32,
    pub output_scale: f32,
}

impl Default for ConvCase {
    fn default() -> Self {
        Self {
            input_shape: vec![1, 8, 8, 4],
            input_dtype: DataType::uint(8),
            kernel_shape: vec![3, 3, 4, 8],
            kernel_dtype: DataType::uint(8),
            attrs: Conv2DAttrs {
                padding: IndexExpr::ints(&[1, 1]),
                channels: Some(IndexExpr::Int(8)),
                kernel_size: IndexExpr::ints(&[3, 3]),
                ..Conv2DAttrs::default()
            },
            pad_width: None,
            input_zero_point: 10,
            input_scale: 0.5,
            kernel_zero_point: 0,
            kernel_scale: 0.1,
            output_zero_point: 5,
            output_scale: 0.2,
        }
    }
}

impl ConvCase {
    /// Depthwise 3x3 over 4 channels (HWIM kernel, groups = channels = 4).
    pub fn depthwise() -> Self {
        let mut case = Self::default();
        case.kernel_shape = vec![3, 3, 4, 1];
        case.attrs.groups = 4;
        case.attrs.channels = Some(IndexExpr::Int(4));
        case.attrs.kernel_layout = "HWOI".to_string();
        case
    }

    pub fn build(&self) -> Expr {
        let numel: i64 = self.kernel_shape.iter().product();
        let out_channels = self.kernel_shape.last().copied().unwrap_or(1);
        let bias_channels = if self.attrs.groups != 1 {
            self.kernel_shape[2]
        } else {
            out_channels
        };

        let mut data = builder::var("data", &self.input_shape, self.input_dtype);
        if let Some(pad_width) = &self.pad_width {
            data = builder::pad(data, pad_width);
        }
        let weight = Expr::Constant(ethosn_ir::Constant {
            data: ethosn_ir::NDArray::new(
                self.kernel_dtype,
                self.kernel_shape.clone(),
                vec![1; numel as usize * self.kernel_dtype.size()],
            )
            .expect("weight buffer"),
        });
        let bias = builder::constant(&vec![0i32; bias_channels as usize], &[bias_channels])
            .expect("bias buffer");

        let conv = builder::qnn_conv2d(
            data,
            weight,
            self.input_zero_point,
            self.kernel_zero_point,
            self.input_scale,
            self.kernel_scale,
            self.attrs.clone(),
        );
        let bias_add = builder::bias_add(conv, bias);
        builder::requantize(
            bias_add,
            self.input_scale * self.kernel_scale,
            0,
            self.output_scale,
            self.output_zero_point,
        )
    }
}

/// `qnn.concatenate` over uint8 NHWC inputs of the given shapes.
pub fn concat_subgraph(shapes: &[&[i64]], axis: i64) -> Expr {
    let inputs = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| builder::var(&format!("in{i}"), shape, DataType::uint(8)))
        .collect();
    let quantization: Vec<(f32, i32)> = (0..shapes.len())
        .map(|i| (0.25 * (i as f32 + 1.0), i as i32))
        .collect();
    builder::qnn_concatenate(inputs, &quantization, 0.5, 3, axis)
}

/// `split` over a uint8 input.
pub fn split_subgraph(shape: &[i64], indices_or_sections: IndicesOrSections, axis: i64) -> Expr {
    let data = builder::var("data", shape, DataType::uint(8));
    builder::split(data, indices_or_sections, axis)
}

/// One query received by `RecordingOracle`.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleCall {
    Convolution {
        bias: TensorInfo,
        weights: TensorInfo,
        conv: ConvolutionInfo,
        input: TensorInfo,
    },
    DepthwiseConvolution {
        bias: TensorInfo,
        weights: TensorInfo,
        conv: ConvolutionInfo,
        input: TensorInfo,
    },
    Concatenation {
        inputs: Vec<TensorInfo>,
        info: ConcatenationInfo,
    },
    Split {
        input: TensorInfo,
        info: SplitInfo,
    },
}

/// Oracle returning a fixed verdict and recording every query.
pub struct RecordingOracle {
    verdict: bool,
    calls: Mutex<Vec<OracleCall>>,
}

impl RecordingOracle {
    pub fn new(verdict: bool) -> Self {
        Self {
            verdict,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(true)
    }

    pub fn rejecting() -> Self {
        Self::new(false)
    }

    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: OracleCall) -> bool {
        self.calls.lock().unwrap().push(call);
        self.verdict
    }
}

impl SupportOracle for RecordingOracle {
    fn is_convolution_supported(
        &self,
        bias: &TensorInfo,
        weights: &TensorInfo,
        conv: &ConvolutionInfo,
        input: &TensorInfo,
    ) -> bool {
        self.record(OracleCall::Convolution {
            bias: bias.clone(),
            weights: weights.clone(),
            conv: conv.clone(),
            input: input.clone(),
        })
    }

    fn is_depthwise_convolution_supported(
        &self,
        bias: &TensorInfo,
        weights: &TensorInfo,
        conv: &ConvolutionInfo,
        input: &TensorInfo,
    ) -> bool {
        self.record(OracleCall::DepthwiseConvolution {
            bias: bias.clone(),
            weights: weights.clone(),
            conv: conv.clone(),
            input: input.clone(),
        })
    }

    fn is_concatenation_supported(&self, inputs: &[TensorInfo], info: &ConcatenationInfo) -> bool {
        self.record(OracleCall::Concatenation {
            inputs: inputs.to_vec(),
            info: info.clone(),
        })
    }

    fn is_split_supported(&self, input: &TensorInfo, info: &SplitInfo) -> bool {
        self.record(OracleCall::Split {
            input: input.clone(),
            info: info.clone(),
        })
    }
}
