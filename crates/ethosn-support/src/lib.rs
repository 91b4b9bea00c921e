//! Ethos-N support layer: translate quantized IR subgraphs into NPU
//! support-library descriptors and validate them.
//!
//! This crate provides:
//! - An accumulating validation error (`EthosnError`)
//! - Extractors for constants and index arrays (`extract`)
//! - Shape, padding, stride, layout and dtype converters (`convert`)
//! - Translators for convolution, concatenation and split (`translate`)
//! - Capability queries that gate an external oracle (`query`)
//!
//! # Example
//!
//! ```
//! use ethosn_ir::{builder, DataType, IndicesOrSections};
//! use ethosn_support::translate::{split, SplitParams};
//!
//! let data = builder::var("x", &[1, 9, 4, 4], DataType::uint(8));
//! let call = builder::split(data, IndicesOrSections::Indices(vec![3, 6]), 1);
//!
//! let mut params = SplitParams::default();
//! let err = split(&call, &mut params);
//!
//! assert!(!err.has_errors());
//! assert_eq!(params.split_info.sizes, [3, 3, 3]);
//! ```

pub mod config;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod oracle;
pub mod query;
pub mod translate;

// Re-export commonly used types
pub use config::SupportConfig;
pub use error::EthosnError;
pub use oracle::SupportOracle;
pub use query::{
    EthosnSupport, concatenate_supported, conv2d_supported, hardware_available, split_supported,
};
