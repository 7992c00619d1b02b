//! Host-facing value and output-slot types.
//!
//! A component receives its inputs as an ordered list of [`Value`]s and
//! writes its results into [`OutputSlot`]s whose shape was fixed at
//! allocation time. Matrix data is stored column-major on the host side.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A typed argument decoded from the host environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    /// A single floating-point number.
    Scalar { value: f64 },
    /// A flat vector of doubles.
    Vector { data: Vec<f64> },
    /// A dense matrix in column-major order.
    Matrix {
        rows: usize,
        cols: usize,
        data: Vec<f64>,
    },
    /// A link/frame or file-path identifier.
    Name { value: String },
}

impl Value {
    /// Build a vector value from a slice.
    pub fn vector(data: impl Into<Vec<f64>>) -> Self {
        Self::Vector { data: data.into() }
    }

    /// Build a name value.
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name {
            value: value.into(),
        }
    }

    /// Scalar payload, if this is a scalar.
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    /// Vector payload, if this is a vector.
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector { data } => Some(data.as_slice()),
            _ => None,
        }
    }

    /// Matrix payload as `(rows, cols, column-major data)`, if this is a matrix.
    pub fn as_matrix(&self) -> Option<(usize, usize, &[f64])> {
        match self {
            Self::Matrix { rows, cols, data } => Some((*rows, *cols, data.as_slice())),
            _ => None,
        }
    }

    /// Name payload, if this is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name { value } => Some(value.as_str()),
            _ => None,
        }
    }

    /// Short label for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "scalar",
            Self::Vector { .. } => "vector",
            Self::Matrix { .. } => "matrix",
            Self::Name { .. } => "name",
        }
    }
}

// ---------------------------------------------------------------------------
// SlotShape
// ---------------------------------------------------------------------------

/// Shape of a host output buffer, fixed at allocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SlotShape {
    /// A flat vector of `len` doubles.
    Vector { len: usize },
    /// A dense `rows x cols` matrix, stored column-major.
    Matrix { rows: usize, cols: usize },
}

impl SlotShape {
    /// Total number of elements in this shape.
    pub const fn element_count(self) -> usize {
        match self {
            Self::Vector { len } => len,
            Self::Matrix { rows, cols } => rows * cols,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputSlot
// ---------------------------------------------------------------------------

/// A host-owned output buffer.
///
/// The shape is fixed when the slot is allocated; `compute` writes elements
/// but never resizes. Contents are unspecified (stale from allocation time,
/// not zero-guaranteed) until a compute succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSlot {
    shape: SlotShape,
    data: Vec<f64>,
}

impl OutputSlot {
    /// Allocate a vector slot of `len` doubles.
    pub fn vector(len: usize) -> Self {
        Self {
            shape: SlotShape::Vector { len },
            data: vec![0.0; len],
        }
    }

    /// Allocate a column-major matrix slot of `rows x cols` doubles.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            shape: SlotShape::Matrix { rows, cols },
            data: vec![0.0; rows * cols],
        }
    }

    /// The slot's fixed shape.
    pub const fn shape(&self) -> SlotShape {
        self.shape
    }

    /// Number of stored elements.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the slot holds zero elements.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read access to the flat storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Write access to the flat storage, borrowed for the duration of one
    /// compute call.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Logical element `(r, c)` for matrix slots (column-major storage).
    ///
    /// # Panics
    ///
    /// Panics if the slot is not a matrix or the indices are out of range.
    pub fn element(&self, r: usize, c: usize) -> f64 {
        match self.shape {
            SlotShape::Matrix { rows, cols } => {
                assert!(r < rows && c < cols, "element index out of range");
                self.data[c * rows + r]
            }
            SlotShape::Vector { .. } => panic!("element() only valid for matrix slots"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
