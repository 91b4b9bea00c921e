//! Capability oracle trait.

use crate::descriptor::{ConcatenationInfo, ConvolutionInfo, SplitInfo, TensorInfo};

/// The NPU support library's capability queries.
///
/// Implementations answer whether a fully described operator can run on the
/// accelerator. The support layer only calls an oracle with descriptors that
/// passed every validation check.
///
/// # Example
///
/// ```
/// use ethosn_support::SupportOracle;
/// use ethosn_support::descriptor::*;
///
/// struct NoConvolutions;
///
/// impl SupportOracle for NoConvolutions {
///     fn is_convolution_supported(
///         &self,
///         _bias: &TensorInfo,
///         _weights: &TensorInfo,
///         _conv: &ConvolutionInfo,
///         _input: &TensorInfo,
///     ) -> bool {
///         false
///     }
///
///     fn is_depthwise_convolution_supported(
///         &self,
///         _bias: &TensorInfo,
///         _weights: &TensorInfo,
///         _conv: &ConvolutionInfo,
///         _input: &TensorInfo,
///     ) -> bool {
///         false
///     }
///
///     fn is_concatenation_supported(&self, _inputs: &[TensorInfo], _info: &ConcatenationInfo) -> bool {
///         true
///     }
///
///     fn is_split_supported(&self, _input: &TensorInfo, _info: &SplitInfo) -> bool {
///         true
///     }
/// }
/// ```
pub trait SupportOracle: Send + Sync {
    fn is_convolution_supported(
        &self,
        bias: &TensorInfo,
        weights: &TensorInfo,
        conv: &ConvolutionInfo,
        input: &TensorInfo,
    ) -> bool;

    fn is_depthwise_convolution_supported(
        &self,
        bias: &TensorInfo,
        weights: &TensorInfo,
        conv: &ConvolutionInfo,
        input: &TensorInfo,
    ) -> bool;

    fn is_concatenation_supported(&self, inputs: &[TensorInfo], info: &ConcatenationInfo) -> bool;

    fn is_split_supported(&self, input: &TensorInfo, info: &SplitInfo) -> bool;
}
