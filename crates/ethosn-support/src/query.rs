//! Capability queries exposed to the partitioning pass.
//!
//! Each query translates one matched call, refuses it outright if the
//! translation reported any failure, and otherwise asks the oracle. The
//! descriptors themselves never leave this module.

use crate::EthosnError;
use crate::config::SupportConfig;
use crate::oracle::SupportOracle;
use crate::translate::{self, ConcatenateParams, ConvolutionParams, SplitParams};
use ethosn_ir::Expr;
use tracing::{debug, trace};

fn rejected(err: &EthosnError) -> bool {
    if err.has_errors() {
        debug!(errors = %err, count = err.messages().len(), "subgraph not supported");
        true
    } else {
        false
    }
}

/// Whether a `qnn.requantize(nn.bias_add(qnn.conv2d(..)))` subgraph can run
/// on the NPU.
#[tracing::instrument(skip_all, fields(op = "qnn.conv2d"))]
pub fn conv2d_supported(call: &Expr, oracle: &dyn SupportOracle) -> bool {
    let mut params = ConvolutionParams::default();
    let err = translate::qnn_conv2d(call, &mut params);
    if rejected(&err) {
        return false;
    }
    let supported = if params.is_depthwise {
        oracle.is_depthwise_convolution_supported(
            &params.bias_info,
            &params.weights_info,
            &params.conv_info,
            &params.activation_info,
        )
    } else {
        oracle.is_convolution_supported(
            &params.bias_info,
            &params.weights_info,
            &params.conv_info,
            &params.activation_info,
        )
    };
    trace!(supported, depthwise = params.is_depthwise, "oracle verdict");
    supported
}

/// Whether a `qnn.concatenate` call can run on the NPU.
#[tracing::instrument(skip_all, fields(op = "qnn.concatenate"))]
pub fn concatenate_supported(call: &Expr, oracle: &dyn SupportOracle) -> bool {
    let mut params = ConcatenateParams::default();
    let err = translate::concatenate(call, &mut params);
    if rejected(&err) {
        return false;
    }
    let supported = oracle.is_concatenation_supported(&params.input_infos, &params.concat_info);
    trace!(supported, inputs = params.input_infos.len(), "oracle verdict");
    supported
}

/// Whether a `split` call can run on the NPU.
#[tracing::instrument(skip_all, fields(op = "split"))]
pub fn split_supported(call: &Expr, oracle: &dyn SupportOracle) -> bool {
    let mut params = SplitParams::default();
    let err = translate::split(call, &mut params);
    if rejected(&err) {
        return false;
    }
    let supported = oracle.is_split_supported(&params.input_info, &params.split_info);
    trace!(supported, segments = params.split_info.sizes.len(), "oracle verdict");
    supported
}

/// Whether the layer was configured with real NPU hardware.
pub fn hardware_available(config: &SupportConfig) -> bool {
    config.hardware
}

/// Configuration and oracle bundled behind the four queries.
pub struct EthosnSupport<O> {
    config: SupportConfig,
    oracle: O,
}

impl<O: SupportOracle> EthosnSupport<O> {
    pub fn new(config: SupportConfig, oracle: O) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &SupportConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn conv2d(&self, call: &Expr) -> bool {
        conv2d_supported(call, &self.oracle)
    }

    pub fn concatenate(&self, call: &Expr) -> bool {
        concatenate_supported(call, &self.oracle)
    }

    pub fn split(&self, call: &Expr) -> bool {
        split_supported(call, &self.oracle)
    }

    pub fn query(&self) -> bool {
        hardware_available(&self.config)
    }
}
