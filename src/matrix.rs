//! Square cost table over an ordered point list (index 0 is the depot).

use crate::error::MatrixError;

/// Pairwise travel cost, stored row-major.
///
/// Entries are non-negative and never NaN; the diagonal is zero. Infinite
/// entries mark unreachable pairs and are tolerated. Symmetry is never
/// assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    size: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Builds a matrix by evaluating `cost(i, j)` for every off-diagonal pair.
    pub fn from_fn(size: usize, mut cost: impl FnMut(usize, usize) -> f64) -> Result<Self, MatrixError> {
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    data[i * size + j] = cost(i, j);
                }
            }
        }
        let matrix = Self { size, data };
        matrix.validate()?;
        Ok(matrix)
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        let matrix = Self { size, data };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Row-major data from a provider that guarantees the invariants itself.
    pub(crate) fn from_trusted(size: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), size * size);
        let matrix = Self { size, data };
        debug_assert!(matrix.validate().is_ok());
        matrix
    }

    fn validate(&self) -> Result<(), MatrixError> {
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(row, col);
                if value.is_nan() {
                    return Err(MatrixError::NotANumber { row, col });
                }
                if value < 0.0 {
                    return Err(MatrixError::Negative { row, col });
                }
                if row == col && value != 0.0 {
                    return Err(MatrixError::NonZeroDiagonal(row));
                }
            }
        }
        Ok(())
    }

    /// Rejects tables carrying unreachable pairs.
    pub fn ensure_finite(&self) -> Result<(), MatrixError> {
        match self.data.iter().position(|value| !value.is_finite()) {
            Some(flat) => Err(MatrixError::NonFinite {
                row: flat / self.size,
                col: flat % self.size,
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| {
                let (a, b) = (self.get(i, j), self.get(j, i));
                a == b || (a - b).abs() <= tolerance
            })
        })
    }

    /// Sum of consecutive edges along `order`, plus the edge from the last
    /// element back to the first when `closed`.
    pub fn route_length(&self, order: &[usize], closed: bool) -> f64 {
        let mut total: f64 = order.windows(2).map(|pair| self.get(pair[0], pair[1])).sum();
        if closed && order.len() > 1 {
            total += self.get(order[order.len() - 1], order[0]);
        }
        total
    }
}
