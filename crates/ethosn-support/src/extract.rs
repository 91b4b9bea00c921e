//! Pull typed values out of constants and index arrays.

use crate::EthosnError;
use ethosn_ir::{Element, Expr, IndexExpr};

/// Maximum rank of a descriptor array.
pub const MAX_DIMS: usize = 4;

/// Read the first scalar of a constant expression into `out`.
///
/// Fails with `expected constant data` when `expr` is not a constant, and
/// when the constant's element type is not `T`. On failure `out` is left
/// untouched.
pub fn as_constant<T: Element>(expr: &Expr, out: &mut T) -> EthosnError {
    let Some(constant) = expr.as_constant() else {
        return EthosnError::msg("expected constant data");
    };
    match constant.data.read_scalar::<T>() {
        Ok(value) => {
            *out = value;
            EthosnError::new()
        }
        Err(err) => EthosnError::msg(format!("expected constant data: {err}")),
    }
}

/// Copy up to four integer immediates into `out`.
///
/// Slots past the end of `arr` keep whatever the caller put there. The copy
/// stops at the first element that is not an immediate or does not fit in
/// `u32`; slots already written keep their new values.
pub fn as_array(arr: &[IndexExpr], out: &mut [u32; MAX_DIMS]) -> EthosnError {
    if arr.len() > MAX_DIMS {
        return EthosnError::msg(format!(
            "dimensions={}, dimensions must be <= {MAX_DIMS}",
            arr.len()
        ));
    }
    for (slot, dim) in out.iter_mut().zip(arr) {
        let Some(value) = dim.as_int() else {
            return EthosnError::msg(format!(
                "axis size={dim}, axis size must be an integer constant"
            ));
        };
        match u32::try_from(value) {
            Ok(v) => *slot = v,
            Err(_) if value < 0 => {
                return EthosnError::msg(format!("axis size={value}, axis size must be >= 0"));
            }
            Err(_) => {
                return EthosnError::msg(format!(
                    "axis size={value}, axis size must be <= {}",
                    u32::MAX
                ));
            }
        }
    }
    EthosnError::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethosn_ir::builder;

    #[test]
    fn test_as_constant_int_and_float() {
        let mut zp = 0i32;
        assert!(!as_constant(&builder::scalar(10i32), &mut zp).has_errors());
        assert_eq!(zp, 10);

        let mut scale = 0.0f32;
        assert!(!as_constant(&builder::scalar(0.5f32), &mut scale).has_errors());
        assert_eq!(scale, 0.5);
    }

    #[test]
    fn test_as_constant_reads_first_element() {
        let expr = builder::constant(&[3i32, 4, 5], &[3]).unwrap();
        let mut v = 0i32;
        assert!(!as_constant(&expr, &mut v).has_errors());
        assert_eq!(v, 3);
    }

    #[test]
    fn test_as_constant_not_constant() {
        let expr = builder::var("x", &[1], ethosn_ir::DataType::int(32));
        let mut v = 7i32;
        let err = as_constant(&expr, &mut v);
        assert_eq!(err.messages(), ["expected constant data"]);
        assert_eq!(v, 7);
    }

    #[test]
    fn test_as_constant_width_mismatch() {
        let mut v = 0.0f32;
        let err = as_constant(&builder::scalar(1i32), &mut v);
        assert!(err.has_errors());
        assert!(err.messages()[0].starts_with("expected constant data"));
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_as_array_keeps_defaults() {
        let mut out = [9, 9, 9, 9];
        let err = as_array(&IndexExpr::ints(&[1, 2]), &mut out);
        assert!(!err.has_errors());
        assert_eq!(out, [1, 2, 9, 9]);
    }

    #[test]
    fn test_as_array_too_many_dims() {
        let mut out = [0; 4];
        let err = as_array(&IndexExpr::ints(&[1, 2, 3, 4, 5]), &mut out);
        assert_eq!(err.messages(), ["dimensions=5, dimensions must be <= 4"]);
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn test_as_array_out_of_range() {
        let mut out = [1, 1, 1, 1];
        let err = as_array(&IndexExpr::ints(&[7, 1 << 32, 3]), &mut out);
        assert_eq!(
            err.messages(),
            ["axis size=4294967296, axis size must be <= 4294967295"]
        );
        // Earlier slot written, later slots untouched.
        assert_eq!(out, [7, 1, 1, 1]);
    }

    #[test]
    fn test_as_array_negative_and_symbolic() {
        let mut out = [0; 4];
        let err = as_array(&IndexExpr::ints(&[-1]), &mut out);
        assert_eq!(err.messages(), ["axis size=-1, axis size must be >= 0"]);

        let dims = vec![IndexExpr::Int(1), IndexExpr::Var("n".to_string())];
        let err = as_array(&dims, &mut out);
        assert!(err.messages()[0].contains("axis size=n"));
        assert_eq!(out[0], 1);
    }
}
