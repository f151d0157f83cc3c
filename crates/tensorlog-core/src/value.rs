//! Decoded tensor values.
//!
//! A [`TensorValue`] owns exactly the bytes its spec demands and decodes
//! scalars on access. The buffer is never reinterpreted in place, so it
//! carries no alignment requirement.

use std::fmt;
use std::sync::Arc;

use crate::element::{ByteOrder, Element, ElementType, Scalar};
use crate::error::TensorError;
use crate::spec::TensorSpec;

/// An owned, read-only tensor bound to the spec that describes it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tensorlog_core::{ByteOrder, ElementType, Scalar, Shape, TensorSpec, TensorValue};
///
/// let spec = Arc::new(
///     TensorSpec::new("f", 0, Shape::from_slice(&[2]), ElementType::Int32).unwrap(),
/// );
/// let value = TensorValue::from_bytes(spec, vec![1, 0, 0, 0, 2, 0, 0, 0], ByteOrder::Little)
///     .unwrap();
///
/// assert_eq!(value.len(), 2);
/// assert_eq!(value.get(1).unwrap(), Scalar::I32(2));
/// assert!(value.get(2).is_err());
/// assert_eq!(value.to_string(), "f: 1,2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TensorValue {
    spec: Arc<TensorSpec>,
    bytes: Vec<u8>,
    order: ByteOrder,
}

impl TensorValue {
    /// Bind a buffer to a spec. The buffer must be exactly `spec.byte_len()` bytes.
    pub fn from_bytes(
        spec: Arc<TensorSpec>,
        bytes: Vec<u8>,
        order: ByteOrder,
    ) -> Result<Self, TensorError> {
        if bytes.len() != spec.byte_len() {
            return Err(TensorError::BufferLength {
                expected: spec.byte_len(),
                got: bytes.len(),
            });
        }
        Ok(Self { spec, bytes, order })
    }

    /// The spec this value was decoded against.
    pub fn spec(&self) -> &Arc<TensorSpec> {
        &self.spec
    }

    /// Tensor name, shorthand for `spec().name()`.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Number of scalars.
    pub fn len(&self) -> usize {
        self.spec.numel()
    }

    /// Whether the tensor holds zero scalars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte order used to decode scalars.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// The raw payload as read from the stream.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Scalar at `index`.
    pub fn get(&self, index: usize) -> Result<Scalar, TensorError> {
        if index >= self.len() {
            return Err(TensorError::IndexOutOfRange {
                index: index as i128,
                len: self.len(),
            });
        }
        Ok(self.scalar_unchecked(index))
    }

    /// Scalar at a signed `index`. Negative indices are out of range, not
    /// offsets from the end.
    pub fn at(&self, index: isize) -> Result<Scalar, TensorError> {
        match usize::try_from(index) {
            Ok(i) => self.get(i),
            Err(_) => Err(TensorError::IndexOutOfRange {
                index: index as i128,
                len: self.len(),
            }),
        }
    }

    /// Iterate over all scalars in storage order.
    pub fn iter(&self) -> Scalars<'_> {
        Scalars {
            value: self,
            next: 0,
        }
    }

    /// Decode every element as `T`, which must match the declared element type.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, TensorError> {
        let found = self.spec.element_type();
        if T::TYPE != found {
            return Err(TensorError::TypeMismatch {
                expected: T::TYPE,
                found,
            });
        }
        Ok(self
            .bytes
            .chunks_exact(found.width())
            .map(|chunk| T::decode(chunk, self.order))
            .collect())
    }

    /// Decode every element widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter().map(|s| s.as_f64()).collect()
    }

    fn scalar_unchecked(&self, index: usize) -> Scalar {
        let ty: ElementType = self.spec.element_type();
        let w = ty.width();
        ty.decode(&self.bytes[index * w..(index + 1) * w], self.order)
    }
}

/// Pretty-print form `"<name>: <v0>,<v1>,..."`.
impl fmt::Display for TensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.spec.name())?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Iterator over the scalars of a [`TensorValue`].
pub struct Scalars<'a> {
    value: &'a TensorValue,
    next: usize,
}

impl Iterator for Scalars<'_> {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        if self.next >= self.value.len() {
            return None;
        }
        let s = self.value.scalar_unchecked(self.next);
        self.next += 1;
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.value.len() - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Scalars<'_> {}

impl<'a> IntoIterator for &'a TensorValue {
    type Item = Scalar;
    type IntoIter = Scalars<'a>;

    fn into_iter(self) -> Scalars<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Shape;

    fn spec(ty: ElementType, dims: &[usize]) -> Arc<TensorSpec> {
        Arc::new(TensorSpec::new("t", 0, Shape::from_slice(dims), ty).unwrap())
    }

    fn value_of(ty: ElementType, len: usize) -> TensorValue {
        TensorValue::from_bytes(spec(ty, &[len]), vec![0; len * ty.width()], ByteOrder::Little)
            .unwrap()
    }

    #[test]
    fn wrong_buffer_length_rejected() {
        let err =
            TensorValue::from_bytes(spec(ElementType::Int32, &[4]), vec![0; 8], ByteOrder::Little)
                .unwrap_err();
        assert_eq!(err, TensorError::BufferLength { expected: 16, got: 8 });
    }

    #[test]
    fn index_bounds_checked_for_every_type() {
        for ty in ElementType::ALL {
            let v = value_of(ty, 3);
            assert_eq!(v.len(), 3);
            assert!(v.get(2).is_ok());
            assert_eq!(
                v.get(3).unwrap_err(),
                TensorError::IndexOutOfRange { index: 3, len: 3 }
            );
            assert_eq!(
                v.at(-1).unwrap_err(),
                TensorError::IndexOutOfRange { index: -1, len: 3 }
            );
            assert!(v.at(0).is_ok());
        }
    }

    #[test]
    fn typed_extraction_checks_type() {
        let mut bytes = Vec::new();
        for x in [1.5f64, -2.25] {
            x.encode(&mut bytes, ByteOrder::Big);
        }
        let v = TensorValue::from_bytes(spec(ElementType::Float64, &[2]), bytes, ByteOrder::Big)
            .unwrap();
        assert_eq!(v.byte_order(), ByteOrder::Big);
        assert_eq!(v.to_vec::<f64>().unwrap(), vec![1.5, -2.25]);
        assert_eq!(
            v.to_vec::<f32>().unwrap_err(),
            TensorError::TypeMismatch {
                expected: ElementType::Float32,
                found: ElementType::Float64,
            }
        );
        assert_eq!(v.to_f64_vec(), vec![1.5, -2.25]);
    }

    #[test]
    fn empty_tensor_prints_name_only() {
        let v = TensorValue::from_bytes(spec(ElementType::UInt8, &[0]), vec![], ByteOrder::Little)
            .unwrap();
        assert!(v.is_empty());
        assert_eq!(v.iter().count(), 0);
        assert_eq!(v.to_string(), "t: ");
    }

    #[test]
    fn display_joins_scalars() {
        let v = TensorValue::from_bytes(
            spec(ElementType::Int8, &[3]),
            vec![0xff, 0, 7],
            ByteOrder::Little,
        )
        .unwrap();
        assert_eq!(v.to_string(), "t: -1,0,7");
    }
}
