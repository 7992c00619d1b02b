//! Dense matrix layout conversion between row-major and column-major storage.
//!
//! A whole-body model computes its matrices in row-major order; numerical
//! host environments usually expect column-major. [`reindex`] performs the
//! full conversion pass between two independent flat buffers of the same
//! logical shape.

// ---------------------------------------------------------------------------
// MatrixLayout
// ---------------------------------------------------------------------------

/// Storage convention for linearising a 2-D matrix into a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixLayout {
    /// Consecutive storage positions vary fastest across a row.
    RowMajor,
    /// Consecutive storage positions vary fastest down a column.
    ColMajor,
}

impl MatrixLayout {
    /// Flat index of logical element `(r, c)` in a `rows x cols` matrix
    /// stored with this layout.
    pub const fn linear_index(self, rows: usize, cols: usize, r: usize, c: usize) -> usize {
        match self {
            Self::RowMajor => r * cols + c,
            Self::ColMajor => c * rows + r,
        }
    }

    /// The opposite storage convention.
    pub const fn transposed(self) -> Self {
        match self {
            Self::RowMajor => Self::ColMajor,
            Self::ColMajor => Self::RowMajor,
        }
    }
}

// ---------------------------------------------------------------------------
// reindex
// ---------------------------------------------------------------------------

/// Copy a `rows x cols` matrix from `src` (stored as `src_layout`) into
/// `dst` (stored as `dst_layout`), preserving logical element positions.
///
/// Source and destination are separate buffers with independent lifetimes;
/// every one of the `rows * cols` elements is visited exactly once. When
/// `src_layout == dst_layout` this degenerates to a plain copy, and an
/// empty shape (`rows == 0` or `cols == 0`) is a no-op.
///
/// # Panics
///
/// Panics if either buffer length differs from `rows * cols`.
pub fn reindex(
    rows: usize,
    cols: usize,
    src_layout: MatrixLayout,
    dst_layout: MatrixLayout,
    src: &[f64],
    dst: &mut [f64],
) {
    assert_eq!(src.len(), rows * cols, "source buffer length mismatch");
    assert_eq!(dst.len(), rows * cols, "destination buffer length mismatch");

    for r in 0..rows {
        for c in 0..cols {
            let from = src_layout.linear_index(rows, cols, r, c);
            let to = dst_layout.linear_index(rows, cols, r, c);
            dst[to] = src[from];
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
