//! Element data types, index expressions, checked types, and constant buffers.

use crate::{IrError, Result};
use std::fmt;

/// Element type class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Int,
    UInt,
    Float,
}

/// Element data type: a type class, a bit width, and a vector lane count.
///
/// Scalars have one lane. The display form follows the usual IR spelling
/// (`uint8`, `int32`, `float32`, `int8x4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub code: TypeCode,
    pub bits: u8,
    pub lanes: u16,
}

impl DataType {
    pub const fn new(code: TypeCode, bits: u8, lanes: u16) -> Self {
        Self { code, bits, lanes }
    }

    /// Scalar signed integer type.
    pub const fn int(bits: u8) -> Self {
        Self::new(TypeCode::Int, bits, 1)
    }

    /// Scalar unsigned integer type.
    pub const fn uint(bits: u8) -> Self {
        Self::new(TypeCode::UInt, bits, 1)
    }

    /// Scalar floating point type.
    pub const fn float(bits: u8) -> Self {
        Self::new(TypeCode::Float, bits, 1)
    }

    /// Vector variant of this type with the given lane count.
    pub const fn with_lanes(self, lanes: u16) -> Self {
        Self::new(self.code, self.bits, lanes)
    }

    pub fn is_scalar(&self) -> bool {
        self.lanes == 1
    }

    pub fn is_int(&self) -> bool {
        self.code == TypeCode::Int
    }

    pub fn is_uint(&self) -> bool {
        self.code == TypeCode::UInt
    }

    pub fn is_float(&self) -> bool {
        self.code == TypeCode::Float
    }

    /// Size of one element in bytes (all lanes, rounded up to whole bytes).
    pub fn size(&self) -> usize {
        (self.bits as usize * self.lanes as usize).div_ceil(8)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self.code {
            TypeCode::Int => "int",
            TypeCode::UInt => "uint",
            TypeCode::Float => "float",
        };
        write!(f, "{class}{}", self.bits)?;
        if self.lanes != 1 {
            write!(f, "x{}", self.lanes)?;
        }
        Ok(())
    }
}

/// Rust scalar types that can back a constant buffer.
pub trait Element: bytemuck::Pod {
    const DTYPE: DataType;
}

impl Element for u8 {
    const DTYPE: DataType = DataType::uint(8);
}

impl Element for i8 {
    const DTYPE: DataType = DataType::int(8);
}

impl Element for i32 {
    const DTYPE: DataType = DataType::int(32);
}

impl Element for i64 {
    const DTYPE: DataType = DataType::int(64);
}

impl Element for f32 {
    const DTYPE: DataType = DataType::float(32);
}

/// An integer-valued index expression (shape extents, attribute values).
///
/// Shapes and attributes are normally integer immediates; symbolic extents
/// survive as named variables and are rejected by anything that needs a
/// concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexExpr {
    Int(i64),
    Var(String),
}

impl IndexExpr {
    /// Build a list of integer immediates.
    pub fn ints(values: &[i64]) -> Vec<IndexExpr> {
        values.iter().copied().map(IndexExpr::Int).collect()
    }

    /// The immediate value, if this is an integer immediate.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            IndexExpr::Int(v) => Some(*v),
            IndexExpr::Var(_) => None,
        }
    }
}

impl From<i64> for IndexExpr {
    fn from(value: i64) -> Self {
        IndexExpr::Int(value)
    }
}

impl fmt::Display for IndexExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexExpr::Int(v) => write!(f, "{v}"),
            IndexExpr::Var(name) => f.write_str(name),
        }
    }
}

/// Displays an index list as `[a, b, c]`.
pub struct IndexList<'a>(pub &'a [IndexExpr]);

impl fmt::Display for IndexList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}")?;
        }
        f.write_str("]")
    }
}

/// Statically resolved type of a tensor value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorType {
    pub shape: Vec<IndexExpr>,
    pub dtype: DataType,
}

impl TensorType {
    pub fn new(shape: &[i64], dtype: DataType) -> Self {
        Self {
            shape: IndexExpr::ints(shape),
            dtype,
        }
    }
}

/// Checked type of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Tensor(TensorType),
    Tuple(Vec<Type>),
}

impl Type {
    pub fn as_tensor(&self) -> Option<&TensorType> {
        match self {
            Type::Tensor(t) => Some(t),
            Type::Tuple(_) => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Type]> {
        match self {
            Type::Tuple(fields) => Some(fields),
            Type::Tensor(_) => None,
        }
    }
}

/// Dense constant buffer: element type, static shape, and native-endian bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct NDArray {
    dtype: DataType,
    shape: Vec<i64>,
    data: Vec<u8>,
}

impl NDArray {
    /// Wrap raw bytes, checking the length against shape and element size.
    pub fn new(dtype: DataType, shape: Vec<i64>, data: Vec<u8>) -> Result<Self> {
        let mut numel = 1usize;
        for &dim in &shape {
            let dim = usize::try_from(dim)
                .map_err(|_| IrError::InvalidShape(format!("negative extent {dim}")))?;
            numel = numel
                .checked_mul(dim)
                .ok_or_else(|| IrError::InvalidShape(format!("shape {shape:?} overflows")))?;
        }
        let expected = numel
            .checked_mul(dtype.size())
            .ok_or_else(|| IrError::InvalidShape(format!("shape {shape:?} overflows")))?;
        if data.len() != expected {
            return Err(IrError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dtype, shape, data })
    }

    /// Copy typed values into a new buffer.
    pub fn from_slice<T: Element>(values: &[T], shape: Vec<i64>) -> Result<Self> {
        Self::new(T::DTYPE, shape, bytemuck::cast_slice(values).to_vec())
    }

    /// Rank-0 buffer holding a single value.
    pub fn scalar<T: Element>(value: T) -> Self {
        Self {
            dtype: T::DTYPE,
            shape: Vec::new(),
            data: bytemuck::bytes_of(&value).to_vec(),
        }
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn shape(&self) -> &[i64] {
        &self.shape
    }

    /// The backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reinterpret the first element of the buffer as `T`.
    ///
    /// This is the only place the IR reinterprets constant bytes. The
    /// requested type must match the buffer's declared element type exactly,
    /// so a caller can never read a value with the wrong width.
    pub fn read_scalar<T: Element>(&self) -> Result<T> {
        if self.dtype != T::DTYPE {
            return Err(IrError::ScalarTypeMismatch {
                requested: T::DTYPE,
                actual: self.dtype,
            });
        }
        let width = std::mem::size_of::<T>();
        let bytes = self.data.get(..width).ok_or(IrError::EmptyConstant)?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Checked type of this buffer.
    pub fn tensor_type(&self) -> TensorType {
        TensorType::new(&self.shape, self.dtype)
    }
}
