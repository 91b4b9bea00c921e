//! Operator attribute bundles.
//!
//! Every call carries one `Attrs` variant. Translators check the variant
//! they expect and report a mismatch rather than assuming it.

use crate::types::IndexExpr;

/// Attribute payload of a call.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Attrs {
    /// Operator takes no attributes.
    #[default]
    None,
    Conv2D(Conv2DAttrs),
    Pad(PadAttrs),
    Requantize(RequantizeAttrs),
    Concatenate(ConcatenateAttrs),
    Split(SplitAttrs),
}

impl Attrs {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Attrs::None => "no",
            Attrs::Conv2D(_) => "conv2d",
            Attrs::Pad(_) => "pad",
            Attrs::Requantize(_) => "requantize",
            Attrs::Concatenate(_) => "concatenate",
            Attrs::Split(_) => "split",
        }
    }

    pub fn as_conv2d(&self) -> Option<&Conv2DAttrs> {
        match self {
            Attrs::Conv2D(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_pad(&self) -> Option<&PadAttrs> {
        match self {
            Attrs::Pad(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_concatenate(&self) -> Option<&ConcatenateAttrs> {
        match self {
            Attrs::Concatenate(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitAttrs> {
        match self {
            Attrs::Split(attrs) => Some(attrs),
            _ => None,
        }
    }
}

impl<'a> TryFrom<&'a Attrs> for &'a Conv2DAttrs {
    type Error = String;

    fn try_from(attrs: &'a Attrs) -> Result<Self, Self::Error> {
        attrs
            .as_conv2d()
            .ok_or_else(|| format!("found {} attributes", attrs.kind()))
    }
}

impl<'a> TryFrom<&'a Attrs> for &'a PadAttrs {
    type Error = String;

    fn try_from(attrs: &'a Attrs) -> Result<Self, Self::Error> {
        attrs
            .as_pad()
            .ok_or_else(|| format!("found {} attributes", attrs.kind()))
    }
}

impl<'a> TryFrom<&'a Attrs> for &'a ConcatenateAttrs {
    type Error = String;

    fn try_from(attrs: &'a Attrs) -> Result<Self, Self::Error> {
        attrs
            .as_concatenate()
            .ok_or_else(|| format!("found {} attributes", attrs.kind()))
    }
}

impl<'a> TryFrom<&'a Attrs> for &'a SplitAttrs {
    type Error = String;

    fn try_from(attrs: &'a Attrs) -> Result<Self, Self::Error> {
        attrs
            .as_split()
            .ok_or_else(|| format!("found {} attributes", attrs.kind()))
    }
}

/// 2D convolution attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Conv2DAttrs {
    pub strides: Vec<IndexExpr>,
    /// 1, 2 or 4 entries: uniform, (height, width), or (top, left, bottom, right).
    pub padding: Vec<IndexExpr>,
    pub dilation: Vec<IndexExpr>,
    pub groups: i64,
    /// Declared output channel count, if any.
    pub channels: Option<IndexExpr>,
    pub kernel_size: Vec<IndexExpr>,
    pub data_layout: String,
    pub kernel_layout: String,
}

impl Default for Conv2DAttrs {
    fn default() -> Self {
        Self {
            strides: IndexExpr::ints(&[1, 1]),
            padding: IndexExpr::ints(&[0, 0]),
            dilation: IndexExpr::ints(&[1, 1]),
            groups: 1,
            channels: None,
            kernel_size: Vec::new(),
            data_layout: "NHWC".to_string(),
            kernel_layout: "HWIO".to_string(),
        }
    }
}

/// Standalone padding attributes: one (before, after) pair per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PadAttrs {
    pub pad_width: Vec<Vec<IndexExpr>>,
    pub pad_mode: String,
}

impl PadAttrs {
    pub fn new(pad_width: &[[i64; 2]]) -> Self {
        Self {
            pad_width: pad_width.iter().map(|pair| IndexExpr::ints(pair)).collect(),
            pad_mode: "constant".to_string(),
        }
    }
}

/// Requantize attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RequantizeAttrs {
    pub axis: i64,
    pub rounding: String,
}

impl Default for RequantizeAttrs {
    fn default() -> Self {
        Self {
            axis: -1,
            rounding: "UPWARD".to_string(),
        }
    }
}

/// Concatenation attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcatenateAttrs {
    pub axis: i64,
}

/// How a split divides its axis.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicesOrSections {
    /// Number of equal sections.
    Sections(i64),
    /// Ascending cut points along the axis.
    Indices(Vec<i64>),
}

/// Split attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitAttrs {
    pub indices_or_sections: IndicesOrSections,
    pub axis: i64,
}
