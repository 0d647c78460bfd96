//! Dense distance matrix.

use crate::error::ValidationError;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries are finite and non-negative. The diagonal is usually zero but this
/// is not required.
///
/// # Examples
///
/// ```
/// use vrp_engine::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 3.0],
///     vec![8.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 2), 8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from explicit rows, validating shape and entries.
    ///
    /// Fails if there are no rows, any row length differs from the number of
    /// rows, or any entry is negative or non-finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let size = rows.len();
        if size == 0 {
            return Err(ValidationError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(size * size);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(ValidationError::NonSquareMatrix {
                    row: from,
                    len: row.len(),
                    expected: size,
                });
            }
            for (to, value) in row.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidDistance { from, to, value });
                }
                data.push(value);
            }
        }

        Ok(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over `(from, to, distance)` for every entry.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(k, &d)| (k / self.size, k % self.size, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 8.0],
            vec![5.0, 0.0, 3.0],
            vec![8.0, 3.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 3);
        assert_eq!(dm.get(1, 2), 3.0);
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(
            DistanceMatrix::from_rows(vec![]),
            Err(ValidationError::EmptyMatrix)
        );
    }

    #[test]
    fn test_from_rows_not_square() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonSquareMatrix {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_rows_negative_entry() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidDistance { from: 0, to: 1, .. }
        ));
    }

    #[test]
    fn test_from_rows_nan_entry() {
        let err =
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidDistance { from: 1, to: 0, .. }
        ));
    }

    #[test]
    fn test_nonzero_diagonal_accepted() {
        let dm = DistanceMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 0.0]]).expect("valid");
        assert_eq!(dm.get(0, 0), 2.0);
    }

    #[test]
    fn test_asymmetric_matrix() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 10.0], vec![15.0, 0.0]]).expect("valid");
        assert_eq!(dm.get(0, 1), 10.0);
        assert_eq!(dm.get(1, 0), 15.0);
    }

    #[test]
    fn test_entries_row_major() {
        let dm = sample();
        let entries: Vec<_> = dm.entries().take(4).collect();
        assert_eq!(entries[1], (0, 1, 5.0));
        assert_eq!(entries[3], (1, 0, 5.0));
    }
}
