//! Split along one axis.

use super::{axis_extent, call_attrs, match_call, tensor_type_of};
use crate::EthosnError;
use crate::convert;
use crate::descriptor::{DataType, SplitInfo, TensorInfo};
use ethosn_ir::{Expr, IndicesOrSections, Op, SplitAttrs};

#[derive(Debug, Clone, Default)]
pub struct SplitParams {
    pub input_info: TensorInfo,
    pub split_info: SplitInfo,
}

/// Translate a split into `params`.
///
/// Sections become equal segment sizes. Cut indices become the differences
/// between consecutive cuts, with a final segment running to the end of
/// the axis.
pub fn split(expr: &Expr, params: &mut SplitParams) -> EthosnError {
    let call = match match_call(expr, &Op::Split, 1) {
        Ok(call) => call,
        Err(err) => return err,
    };
    let mut err = EthosnError::new();

    let mut input_shape = [1u32; 4];
    let mut input_type = DataType::default();
    match tensor_type_of(&call.args[0], "split input") {
        Ok(tensor) => {
            err += convert::tensor_shape(&tensor.shape, &mut input_shape);
            err += convert::data_type(&tensor.dtype, &mut input_type);
        }
        Err(e) => err += e,
    }
    params.input_info = TensorInfo::new(
        input_shape,
        input_type,
        params.input_info.data_format,
        params.input_info.quantization_info,
    );

    let attrs: &SplitAttrs = match call_attrs(call) {
        Ok(attrs) => attrs,
        Err(e) => {
            err += e;
            return err;
        }
    };
    let axis_size = match axis_extent(&input_shape, attrs.axis) {
        Ok(size) => size,
        Err(e) => {
            err += e;
            return err;
        }
    };
    // In range: axis_extent accepted it as an index into a 4-slot shape.
    params.split_info.axis = attrs.axis as u32;

    match &attrs.indices_or_sections {
        IndicesOrSections::Sections(sections) => {
            err += equal_sizes(axis_size, *sections, &mut params.split_info.sizes);
        }
        IndicesOrSections::Indices(indices) => {
            err += sizes_from_indices(axis_size, indices, &mut params.split_info.sizes);
        }
    }
    err
}

fn equal_sizes(axis_size: u32, sections: i64, sizes: &mut Vec<u32>) -> EthosnError {
    let Ok(count) = u32::try_from(sections) else {
        return EthosnError::msg(format!("sections={sections}, sections must be > 0"));
    };
    if count == 0 {
        return EthosnError::msg(format!("sections={sections}, sections must be > 0"));
    }
    // Segments must be non-empty.
    if count > axis_size {
        return EthosnError::msg(format!(
            "sections={sections}, axis size={axis_size}, sections must be <= axis size"
        ));
    }
    if axis_size % count != 0 {
        return EthosnError::msg(format!(
            "sections={sections}, axis size={axis_size}, axis size must be divisible by sections"
        ));
    }
    sizes.extend(std::iter::repeat_n(axis_size / count, count as usize));
    EthosnError::new()
}

fn sizes_from_indices(axis_size: u32, indices: &[i64], sizes: &mut Vec<u32>) -> EthosnError {
    let mut last_index = 0i64;
    for &index in indices {
        if index < last_index || index > i64::from(axis_size) {
            return EthosnError::msg(format!(
                "split index={index}, indices must be ascending and <= axis size={axis_size}"
            ));
        }
        sizes.push((index - last_index) as u32);
        last_index = index;
    }
    sizes.push(axis_size - last_index as u32);
    EthosnError::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_sizes() {
        let mut sizes = Vec::new();
        assert!(!equal_sizes(12, 3, &mut sizes).has_errors());
        assert_eq!(sizes, [4, 4, 4]);
    }

    #[test]
    fn test_equal_sizes_uneven() {
        let mut sizes = Vec::new();
        let err = equal_sizes(10, 3, &mut sizes);
        assert_eq!(
            err.messages(),
            ["sections=3, axis size=10, axis size must be divisible by sections"]
        );
        assert!(sizes.is_empty());
    }

    #[test]
    fn test_equal_sizes_more_sections_than_extent() {
        let mut sizes = Vec::new();
        let err = equal_sizes(9, 50_000_000, &mut sizes);
        assert_eq!(
            err.messages(),
            ["sections=50000000, axis size=9, sections must be <= axis size"]
        );
        assert!(sizes.is_empty());

        let err = equal_sizes(0, 3, &mut sizes);
        assert_eq!(
            err.messages(),
            ["sections=3, axis size=0, sections must be <= axis size"]
        );
        assert!(sizes.is_empty());
    }

    #[test]
    fn test_equal_sizes_non_positive() {
        let mut sizes = Vec::new();
        assert!(equal_sizes(8, 0, &mut sizes).has_errors());
        assert!(equal_sizes(8, -2, &mut sizes).has_errors());
        assert!(sizes.is_empty());
    }

    #[test]
    fn test_sizes_from_indices() {
        let mut sizes = Vec::new();
        assert!(!sizes_from_indices(9, &[3, 6], &mut sizes).has_errors());
        assert_eq!(sizes, [3, 3, 3]);

        let mut sizes = Vec::new();
        assert!(!sizes_from_indices(10, &[2], &mut sizes).has_errors());
        assert_eq!(sizes, [2, 8]);

        let mut sizes = Vec::new();
        assert!(!sizes_from_indices(5, &[], &mut sizes).has_errors());
        assert_eq!(sizes, [5]);
    }

    #[test]
    fn test_sizes_from_indices_out_of_order() {
        let mut sizes = Vec::new();
        let err = sizes_from_indices(9, &[6, 3], &mut sizes);
        assert_eq!(
            err.messages(),
            ["split index=3, indices must be ascending and <= axis size=9"]
        );

        let mut sizes = Vec::new();
        assert!(sizes_from_indices(9, &[3, 12], &mut sizes).has_errors());
    }

    #[test]
    fn test_wrong_attributes() {
        let data = ethosn_ir::builder::var("x", &[1, 4, 4, 4], ethosn_ir::DataType::uint(8));
        let call = ethosn_ir::builder::call(Op::Split, vec![data], ethosn_ir::Attrs::None);
        let mut params = SplitParams::default();
        let err = split(&call, &mut params);
        assert_eq!(err.messages(), ["expected split attributes, found no attributes"]);
        assert!(params.split_info.sizes.is_empty());
    }
}
