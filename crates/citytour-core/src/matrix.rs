use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Cost, Error, NodeId, Result, WeightedGraph};

/// All-pairs minimum costs. `None` marks an unreachable pair.
///
/// Built once per network snapshot and never mutated afterwards; a changed
/// network needs a freshly computed matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<Cost>>>", into = "Vec<Vec<Option<Cost>>>")]
pub struct DistanceMatrix {
    size: usize,
    // Flattened row-major for cache locality
    cells: Vec<Option<Cost>>,
}

impl DistanceMatrix {
    pub fn from_rows(rows: Vec<Vec<Option<Cost>>>) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(Error::MatrixShape {
                    row,
                    found: values.len(),
                    expected: size,
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    pub(crate) fn from_cells(size: usize, cells: Vec<Option<Cost>>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// If either index is `>= self.len()`. Use [`DistanceMatrix::try_get`] for untrusted indices.
    #[inline(always)]
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<Cost> {
        assert!(from < self.size && to < self.size, "node index out of range");
        self.cells[from * self.size + to]
    }

    pub fn try_get(&self, from: NodeId, to: NodeId) -> Result<Option<Cost>> {
        Error::check_node(from, self.size)?;
        Error::check_node(to, self.size)?;
        Ok(self.cells[from * self.size + to])
    }

    /// Costs from `from` to every node, `None` if `from` is out of range.
    pub fn row(&self, from: NodeId) -> Option<&[Option<Cost>]> {
        if from >= self.size {
            return None;
        }
        Some(&self.cells[from * self.size..(from + 1) * self.size])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Cost>]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    /// Renders the matrix with `names` as row labels instead of bare indices.
    pub fn labeled<'a>(&'a self, names: &'a [String]) -> LabeledMatrix<'a> {
        LabeledMatrix {
            matrix: self,
            names,
        }
    }
}

impl WeightedGraph for DistanceMatrix {
    fn num_nodes(&self) -> usize {
        self.size
    }

    fn edge_cost(&self, from: NodeId, to: NodeId) -> Option<Cost> {
        self.get(from, to)
    }
}

impl TryFrom<Vec<Vec<Option<Cost>>>> for DistanceMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<Option<Cost>>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<Option<Cost>>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.rows().map(<[_]>::to_vec).collect()
    }
}

pub struct LabeledMatrix<'a> {
    matrix: &'a DistanceMatrix,
    names: &'a [String],
}

fn write_matrix(
    f: &mut fmt::Formatter<'_>,
    matrix: &DistanceMatrix,
    label: impl Fn(NodeId) -> String,
) -> fmt::Result {
    write!(f, "{:12}", "")?;
    for i in 0..matrix.len() {
        write!(f, "{i:>6}")?;
    }
    writeln!(f)?;

    for (i, row) in matrix.rows().enumerate() {
        write!(f, "{:>10}: ", label(i))?;
        for cost in row {
            match cost {
                Some(cost) => write!(f, "{cost:>6}")?,
                None => write!(f, "{:>6}", "INF")?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(f, self, |i| i.to_string())
    }
}

impl fmt::Display for LabeledMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(f, self.matrix, |i| {
            self.names
                .get(i)
                .cloned()
                .unwrap_or_else(|| i.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![Some(0), Some(4), None],
            vec![Some(4), Some(0), Some(2)],
            vec![None, Some(2), Some(0)],
        ])
        .unwrap()
    }

    #[test]
    fn rows_must_be_square() {
        let err = DistanceMatrix::from_rows(vec![vec![Some(0), Some(1)], vec![Some(1)]]);
        assert!(matches!(
            err,
            Err(Error::MatrixShape {
                row: 1,
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn lookups_follow_row_major_layout() {
        let matrix = sample();
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get(1, 2), Some(2));
        assert_eq!(matrix.get(0, 2), None);
        assert_eq!(matrix.row(1), Some(&[Some(4), Some(0), Some(2)][..]));
        assert_eq!(matrix.row(3), None);
        assert!(matrix.try_get(0, 3).is_err());
        assert!(matrix.try_get(3, 0).is_err());
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn json_uses_nested_rows_with_null_for_unreachable() {
        let matrix = sample();
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, "[[0,4,null],[4,0,2],[null,2,0]]");

        let back: DistanceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
        assert!(serde_json::from_str::<DistanceMatrix>("[[0,1],[1]]").is_err());
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let matrix = DistanceMatrix::from_rows(Vec::new()).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), 0);
    }

    #[test]
    fn labeled_display_uses_names() {
        let names = vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()];
        let rendered = sample().labeled(&names).to_string();
        assert!(rendered.contains("Gamma:"));
        assert!(rendered.contains("INF"));
        assert_eq!(rendered.lines().count(), 4);
    }
}
