//! Typed extraction of component inputs from the host argument list.

use marionette_core::Value;

use crate::error::ShapeError;

/// Extract argument `index` as a vector.
pub(crate) fn vector_arg<'a>(
    args: &'a [Value],
    index: usize,
    what: &'static str,
) -> Result<&'a [f64], ShapeError> {
    let value = args
        .get(index)
        .ok_or(ShapeError::MissingArgument { index, what })?;
    value.as_vector().ok_or_else(|| ShapeError::TypeMismatch {
        index,
        expected: "vector",
        got: value.kind_name(),
    })
}

/// Extract argument `index` as a vector of exactly `expected` elements.
pub(crate) fn sized_vector_arg<'a>(
    args: &'a [Value],
    index: usize,
    what: &'static str,
    expected: usize,
) -> Result<&'a [f64], ShapeError> {
    let data = vector_arg(args, index, what)?;
    if data.len() == expected {
        Ok(data)
    } else {
        Err(ShapeError::LengthMismatch {
            what,
            expected,
            got: data.len(),
        })
    }
}

/// Extract argument `index` as a name.
pub(crate) fn name_arg<'a>(
    args: &'a [Value],
    index: usize,
    what: &'static str,
) -> Result<&'a str, ShapeError> {
    let value = args
        .get(index)
        .ok_or(ShapeError::MissingArgument { index, what })?;
    value.as_name().ok_or_else(|| ShapeError::TypeMismatch {
        index,
        expected: "name",
        got: value.kind_name(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
