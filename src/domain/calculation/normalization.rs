//! Normalization strategies shared by the ranking methods.
//!
//! Every function is pure and guards its divisions: a zero denominator yields
//! a normalized value of 0 instead of NaN or infinity.

use super::CriterionType;

/// Matrix of values, one row per alternative.
pub type Matrix = Vec<Vec<f64>>;

fn column_count(matrix: &[Vec<f64>]) -> usize {
    matrix.first().map(|r| r.len()).unwrap_or(0)
}

fn orientation(types: &[CriterionType], j: usize) -> CriterionType {
    types.get(j).copied().unwrap_or_default()
}

/// Extracts column `j`.
pub fn column(matrix: &[Vec<f64>], j: usize) -> Vec<f64> {
    matrix.iter().map(|row| row.get(j).copied().unwrap_or(0.0)).collect()
}

/// Returns (min, max) of column `j`, or (0, 0) for an empty matrix.
pub fn column_extremes(matrix: &[Vec<f64>], j: usize) -> (f64, f64) {
    let values = column(matrix, j);
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Ratio normalization.
///
/// Benefit: `x / max` (0 if max is 0). Cost: `min / x` (0 if x is 0).
pub fn benefit_ratio(matrix: &[Vec<f64>], types: &[CriterionType]) -> Matrix {
    let extremes: Vec<_> = (0..column_count(matrix))
        .map(|j| column_extremes(matrix, j))
        .collect();

    matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &x)| {
                    let (min, max) = extremes[j];
                    match orientation(types, j) {
                        CriterionType::Benefit => {
                            if max != 0.0 {
                                x / max
                            } else {
                                0.0
                            }
                        }
                        CriterionType::Cost => {
                            if x != 0.0 {
                                min / x
                            } else {
                                0.0
                            }
                        }
                    }
                })
                .collect()
        })
        .collect()
}

/// Euclidean (vector) normalization: `x / sqrt(Σ x²)` per column.
pub fn vector(matrix: &[Vec<f64>]) -> Matrix {
    let norms: Vec<f64> = (0..column_count(matrix))
        .map(|j| column(matrix, j).iter().map(|x| x * x).sum::<f64>().sqrt())
        .collect();

    scale_columns(matrix, &norms)
}

/// Column-maximum normalization: `x / max` per column, regardless of orientation.
pub fn column_max(matrix: &[Vec<f64>]) -> Matrix {
    let maxima: Vec<f64> = (0..column_count(matrix))
        .map(|j| column_extremes(matrix, j).1)
        .collect();

    scale_columns(matrix, &maxima)
}

fn scale_columns(matrix: &[Vec<f64>], divisors: &[f64]) -> Matrix {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &x)| {
                    let d = divisors.get(j).copied().unwrap_or(0.0);
                    if d != 0.0 {
                        x / d
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Oriented min-max normalization onto [0, 1], where 1 is always best.
///
/// Benefit: `(x - min) / (max - min)`. Cost: `(max - x) / (max - min)`.
/// A constant column normalizes to 0.
pub fn min_max(matrix: &[Vec<f64>], types: &[CriterionType]) -> Matrix {
    let extremes: Vec<_> = (0..column_count(matrix))
        .map(|j| column_extremes(matrix, j))
        .collect();

    matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &x)| {
                    let (min, max) = extremes[j];
                    let range = max - min;
                    if range == 0.0 {
                        return 0.0;
                    }
                    match orientation(types, j) {
                        CriterionType::Benefit => (x - min) / range,
                        CriterionType::Cost => (max - x) / range,
                    }
                })
                .collect()
        })
        .collect()
}

/// Multiplies every entry by its column weight.
pub fn apply_weights(matrix: &[Vec<f64>], weights: &[f64]) -> Matrix {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &x)| x * weights.get(j).copied().unwrap_or(0.0))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: CriterionType = CriterionType::Benefit;
    const C: CriterionType = CriterionType::Cost;

    fn assert_close(actual: &[Vec<f64>], expected: &[Vec<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a_row, e_row) in actual.iter().zip(expected) {
            for (a, e) in a_row.iter().zip(e_row) {
                assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
            }
        }
    }

    #[test]
    fn benefit_ratio_matches_cost_and_benefit_rules() {
        let matrix = vec![vec![2.0, 8.0], vec![4.0, 4.0]];
        let normalized = benefit_ratio(&matrix, &[C, B]);
        assert_close(&normalized, &[vec![1.0, 1.0], vec![0.5, 0.5]]);
    }

    #[test]
    fn benefit_ratio_zero_column_is_zero() {
        let matrix = vec![vec![0.0], vec![0.0]];
        assert_close(&benefit_ratio(&matrix, &[B]), &[vec![0.0], vec![0.0]]);
        assert_close(&benefit_ratio(&matrix, &[C]), &[vec![0.0], vec![0.0]]);
    }

    #[test]
    fn benefit_ratio_constant_column_is_one() {
        let matrix = vec![vec![3.0], vec![3.0]];
        assert_close(&benefit_ratio(&matrix, &[B]), &[vec![1.0], vec![1.0]]);
        assert_close(&benefit_ratio(&matrix, &[C]), &[vec![1.0], vec![1.0]]);
    }

    #[test]
    fn vector_normalization_has_unit_column_norm() {
        let matrix = vec![vec![3.0, 0.0], vec![4.0, 0.0]];
        let normalized = vector(&matrix);
        assert_close(&normalized, &[vec![0.6, 0.0], vec![0.8, 0.0]]);
    }

    #[test]
    fn column_max_ignores_orientation() {
        let matrix = vec![vec![5.0, 2.0], vec![10.0, 4.0]];
        assert_close(&column_max(&matrix), &[vec![0.5, 0.5], vec![1.0, 1.0]]);
    }

    #[test]
    fn min_max_orients_cost_columns() {
        let matrix = vec![vec![1.0, 1.0], vec![3.0, 3.0], vec![2.0, 2.0]];
        let normalized = min_max(&matrix, &[B, C]);
        assert_close(
            &normalized,
            &[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.5, 0.5]],
        );
    }

    #[test]
    fn min_max_constant_column_is_zero() {
        let matrix = vec![vec![7.0], vec![7.0]];
        assert_close(&min_max(&matrix, &[B]), &[vec![0.0], vec![0.0]]);
    }

    #[test]
    fn apply_weights_scales_columns() {
        let matrix = vec![vec![1.0, 1.0], vec![0.5, 0.5]];
        let weighted = apply_weights(&matrix, &[0.5, 0.25]);
        assert_close(&weighted, &[vec![0.5, 0.25], vec![0.25, 0.125]]);
    }

    #[test]
    fn column_extremes_of_empty_matrix() {
        assert_eq!(column_extremes(&[], 0), (0.0, 0.0));
    }
}
