//! Tensor shapes and the immutable [`TensorSpec`] describing one tensor slot.

use std::fmt;

use smallvec::SmallVec;

use crate::element::ElementType;
use crate::error::TensorError;

/// Ordered dimension sizes of a tensor.
///
/// An empty shape denotes a scalar and counts as one element. Most
/// logged tensors have rank 0..=2, hence the inline capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape(pub SmallVec<[usize; 4]>);

impl Shape {
    /// Build a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Self {
        Self(dims.iter().copied().collect())
    }

    /// The scalar shape `[]`.
    pub fn scalar() -> Self {
        Self(SmallVec::new())
    }

    /// Dimension sizes in declared order.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Product of all dimensions, starting from 1.
    ///
    /// Returns `None` on overflow.
    pub fn checked_numel(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(dims))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{d}")?;
        }
        f.write_str("]")
    }
}

/// Static description of one tensor slot in a section header.
///
/// Immutable once built. The element count and byte length are computed
/// up front so a spec whose payload size would overflow never exists.
///
/// # Examples
///
/// ```
/// use tensorlog_core::{ElementType, Shape, TensorSpec};
///
/// let spec = TensorSpec::new("f", 0, Shape::from_slice(&[2, 3]), ElementType::Int32).unwrap();
/// assert_eq!(spec.numel(), 6);
/// assert_eq!(spec.byte_len(), 24);
///
/// let scalar = TensorSpec::new("s", 1, Shape::scalar(), ElementType::Float64).unwrap();
/// assert_eq!(scalar.numel(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TensorSpec {
    name: String,
    port: i64,
    shape: Shape,
    element_type: ElementType,
    numel: usize,
    byte_len: usize,
}

impl TensorSpec {
    /// Create a spec, rejecting shapes whose byte size overflows `usize`.
    pub fn new(
        name: impl Into<String>,
        port: i64,
        shape: Shape,
        element_type: ElementType,
    ) -> Result<Self, TensorError> {
        let name = name.into();
        let numel = shape.checked_numel();
        let byte_len = numel.and_then(|n| n.checked_mul(element_type.width()));
        match (numel, byte_len) {
            (Some(numel), Some(byte_len)) => Ok(Self {
                name,
                port,
                shape,
                element_type,
                numel,
                byte_len,
            }),
            _ => Err(TensorError::SizeOverflow { name }),
        }
    }

    /// Tensor name, unique within its header list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caller-defined routing tag. Opaque to the decoder.
    pub fn port(&self) -> i64 {
        self.port
    }

    /// Declared shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Declared element type.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Number of scalars in one value of this spec.
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Bytes occupied by one value of this spec in the stream.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl fmt::Display for TensorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", self.name, self.element_type, self.shape)
    }
}
