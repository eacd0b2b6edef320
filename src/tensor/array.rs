use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;

/// Element type of an [`Array`].
///
/// `Str` exists so that a caller *can* hand the model non-numeric data; the
/// model rejects it with a dtype error instead of the type system making the
/// mistake unrepresentable. That mirrors the dynamically-typed arrays the
/// lifecycle contract is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dtype {
    F64,
    Str,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dtype::F64 => write!(f, "float64"),
            Dtype::Str => write!(f, "str"),
        }
    }
}

/// Flat element storage for an [`Array`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayData {
    F64(Vec<f64>),
    Str(Vec<String>),
}

impl ArrayData {
    fn len(&self) -> usize {
        match self {
            ArrayData::F64(v) => v.len(),
            ArrayData::Str(v) => v.len(),
        }
    }
}

/// An n-dimensional array with a runtime shape and dtype.
///
/// Invariant: the element count equals the product of `shape`. Constructors
/// uphold it; there is no way to mutate shape or data independently from
/// outside this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Array {
    shape: Vec<usize>,
    data: ArrayData,
}

impl Array {
    /// Zero-filled numeric array.
    pub fn zeros(shape: &[usize]) -> Array {
        Array {
            shape: shape.to_vec(),
            data: ArrayData::F64(vec![0.0; shape.iter().product()]),
        }
    }

    /// Uniform random values in [0, 1).
    pub fn random(shape: &[usize]) -> Array {
        let mut rng = rand::thread_rng();
        let n: usize = shape.iter().product();
        Array {
            shape: shape.to_vec(),
            data: ArrayData::F64((0..n).map(|_| rng.gen::<f64>()).collect()),
        }
    }

    /// Uniform random integers in [lo, hi), stored as f64.
    pub fn random_int(lo: i64, hi: i64, shape: &[usize]) -> Array {
        let mut rng = rand::thread_rng();
        let n: usize = shape.iter().product();
        Array {
            shape: shape.to_vec(),
            data: ArrayData::F64((0..n).map(|_| rng.gen_range(lo..hi) as f64).collect()),
        }
    }

    /// 2-D numeric array from equal-length rows.
    pub fn from_vec2(rows: Vec<Vec<f64>>) -> Result<Array, ModelError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ModelError::shape(
                    &format!("row {i} of 2-D array"),
                    &[n_cols],
                    &[row.len()],
                ));
            }
        }
        Ok(Array {
            shape: vec![n_rows, n_cols],
            data: ArrayData::F64(rows.into_iter().flatten().collect()),
        })
    }

    /// 2-D string array from equal-length rows. This is the array a caller
    /// builds when demonstrating the dtype violation.
    pub fn from_string_rows(rows: Vec<Vec<String>>) -> Result<Array, ModelError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ModelError::shape(
                    &format!("row {i} of 2-D array"),
                    &[n_cols],
                    &[row.len()],
                ));
            }
        }
        Ok(Array {
            shape: vec![n_rows, n_cols],
            data: ArrayData::Str(rows.into_iter().flatten().collect()),
        })
    }

    pub fn dtype(&self) -> Dtype {
        match self.data {
            ArrayData::F64(_) => Dtype::F64,
            ArrayData::Str(_) => Dtype::Str,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of samples: the leading dimension.
    pub fn n_samples(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// All dimensions after the leading (batch) one.
    pub fn trailing_dims(&self) -> &[usize] {
        if self.shape.is_empty() {
            &[]
        } else {
            &self.shape[1..]
        }
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Views the array as numeric sample rows (leading dim × flattened rest).
    ///
    /// Fails with a dtype error on string data; this is the single point
    /// where the numeric-input contract is enforced.
    pub fn as_f64_rows(&self, context: &str) -> Result<Vec<&[f64]>, ModelError> {
        let flat = match &self.data {
            ArrayData::F64(v) => v,
            ArrayData::Str(_) => {
                return Err(ModelError::DtypeCast {
                    context: context.to_string(),
                    expected: Dtype::F64,
                    actual: Dtype::Str,
                })
            }
        };
        let n = self.n_samples();
        let width: usize = self.trailing_dims().iter().product::<usize>().max(1);
        Ok((0..n).map(|i| &flat[i * width..(i + 1) * width]).collect())
    }
}

/// One-hot encodes a 1-D array of class indices into shape
/// `(n, n_classes)`. Values are rounded to the nearest integer; indices
/// outside `[0, n_classes)` are a shape error.
pub fn one_hot(labels: &Array, n_classes: usize) -> Result<Array, ModelError> {
    if labels.trailing_dims().iter().product::<usize>() > 1 {
        return Err(ModelError::shape(
            "one_hot labels",
            &[labels.n_samples()],
            labels.shape(),
        ));
    }
    let rows = labels.as_f64_rows("one_hot labels")?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let idx = row[0].round();
        if idx < 0.0 || idx as usize >= n_classes {
            return Err(ModelError::InvalidHyperparameter {
                param: "class index",
                value: format!("{idx} (n_classes = {n_classes})"),
            });
        }
        let mut encoded = vec![0.0; n_classes];
        encoded[idx as usize] = 1.0;
        out.push(encoded);
    }
    Array::from_vec2(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_has_requested_shape_and_range() {
        let a = Array::random(&[4, 3]);
        assert_eq!(a.shape(), &[4, 3]);
        assert_eq!(a.len(), 12);
        let rows = a.as_f64_rows("test").unwrap();
        assert!(rows.iter().flat_map(|r| r.iter()).all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn trailing_dims_of_3d_array() {
        let a = Array::random(&[10, 28, 28]);
        assert_eq!(a.n_samples(), 10);
        assert_eq!(a.trailing_dims(), &[28, 28]);
    }

    #[test]
    fn string_array_refuses_numeric_view() {
        let a = Array::from_string_rows(vec![vec!["1.0".into(), "2.0".into()]]).unwrap();
        assert_eq!(a.dtype(), Dtype::Str);
        let err = a.as_f64_rows("test").unwrap_err();
        assert!(matches!(err, ModelError::DtypeCast { .. }));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Array::from_vec2(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }

    #[test]
    fn one_hot_encodes_indices() {
        let labels = Array::from_vec2(vec![vec![0.0], vec![2.0], vec![1.0]]).unwrap();
        let encoded = one_hot(&labels, 3).unwrap();
        assert_eq!(encoded.shape(), &[3, 3]);
        let rows = encoded.as_f64_rows("test").unwrap();
        assert_eq!(rows[0], &[1.0, 0.0, 0.0]);
        assert_eq!(rows[1], &[0.0, 0.0, 1.0]);
        assert_eq!(rows[2], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn one_hot_rejects_out_of_range_class() {
        let labels = Array::from_vec2(vec![vec![5.0]]).unwrap();
        assert!(one_hot(&labels, 3).is_err());
    }
}
