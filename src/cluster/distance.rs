use ndarray::{Array2, ArrayView1, ArrayView2};

/// Squared Euclidean distance between two attribute vectors.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
pub fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "attribute count mismatch: {} vs {}",
        a.len(),
        b.len()
    );
    a.iter()
        .zip(b.iter())
        .fold(0.0, |acc, (&x, &y)| acc + (x - y).powi(2))
}

/// Pairwise squared distances: entry `(i, j)` is the distance between row `i`
/// of `rows` and row `j` of `others`.
///
/// # Panics
///
/// Panics if the two matrices have different column counts.
pub fn distance_matrix(rows: ArrayView2<f64>, others: ArrayView2<f64>) -> Array2<f64> {
    assert_eq!(
        rows.ncols(),
        others.ncols(),
        "attribute count mismatch: {} vs {}",
        rows.ncols(),
        others.ncols()
    );
    Array2::from_shape_fn((rows.nrows(), others.nrows()), |(i, j)| {
        squared_distance(rows.row(i), others.row(j))
    })
}

/// Index and value of the smallest element. Ties go to the lowest index.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn argmin(values: ArrayView1<f64>) -> (usize, f64) {
    assert!(!values.is_empty(), "cannot take the minimum of an empty array");
    let mut best = (0, values[0]);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < best.1 {
            best = (i, v);
        }
    }
    best
}

/// Mean vector of every group that has at least one member, in ascending
/// group order. Empty groups contribute no row.
pub fn centroids(data: ArrayView2<f64>, assignment: &[usize], k: usize) -> Array2<f64> {
    let dim = data.ncols();
    let mut sums = Array2::<f64>::zeros((k, dim));
    let mut counts = vec![0usize; k];
    for (point, &group) in data.rows().into_iter().zip(assignment) {
        counts[group] += 1;
        let mut sum = sums.row_mut(group);
        sum += &point;
    }

    let occupied: Vec<usize> = (0..k).filter(|&g| counts[g] > 0).collect();
    let mut means = Array2::<f64>::zeros((occupied.len(), dim));
    for (row, &group) in occupied.iter().enumerate() {
        let count = counts[group] as f64;
        means
            .row_mut(row)
            .assign(&sums.row(group).mapv(|s| s / count));
    }
    means
}

/// Assigns every row to its nearest centroid and returns the assignment with
/// the matching minimum distances.
pub fn nearest(data: ArrayView2<f64>, centroids: ArrayView2<f64>) -> (Vec<usize>, Vec<f64>) {
    let distances = distance_matrix(data, centroids);
    distances.rows().into_iter().map(argmin).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_squared_distance() {
        let a = arr1(&[1.0, 2.0, 3.0]);
        let b = arr1(&[4.0, 6.0, 3.0]);
        assert_relative_eq!(squared_distance(a.view(), b.view()), 25.0);
    }

    #[test]
    #[should_panic(expected = "attribute count mismatch")]
    fn test_squared_distance_mismatch() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0]);
        squared_distance(a.view(), b.view());
    }

    #[test]
    fn test_distance_matrix() {
        let rows = arr2(&[[0.0, 0.0], [1.0, 1.0], [3.0, 0.0]]);
        let others = arr2(&[[0.0, 0.0], [3.0, 1.0]]);
        let d = distance_matrix(rows.view(), others.view());
        assert_eq!(d.dim(), (3, 2));
        assert_relative_eq!(d[[0, 0]], 0.0);
        assert_relative_eq!(d[[0, 1]], 10.0);
        assert_relative_eq!(d[[1, 0]], 2.0);
        assert_relative_eq!(d[[1, 1]], 4.0);
        assert_relative_eq!(d[[2, 1]], 1.0);
    }

    #[test]
    #[should_panic(expected = "attribute count mismatch")]
    fn test_distance_matrix_mismatch() {
        let rows = arr2(&[[0.0, 0.0]]);
        let others = arr2(&[[0.0, 0.0, 0.0]]);
        distance_matrix(rows.view(), others.view());
    }

    #[test]
    fn test_argmin_ties_go_to_lowest_index() {
        let values = arr1(&[3.0, 1.0, 1.0, 2.0]);
        assert_eq!(argmin(values.view()), (1, 1.0));
    }

    #[test]
    #[should_panic(expected = "empty array")]
    fn test_argmin_empty() {
        let values: ndarray::Array1<f64> = arr1(&[]);
        argmin(values.view());
    }

    #[test]
    fn test_centroids_skip_empty_groups() {
        let data = arr2(&[[0.0, 0.0], [2.0, 2.0], [10.0, 4.0]]);
        let means = centroids(data.view(), &[0, 0, 2], 3);
        assert_eq!(means.dim(), (2, 2));
        assert_relative_eq!(means[[0, 0]], 1.0);
        assert_relative_eq!(means[[0, 1]], 1.0);
        assert_relative_eq!(means[[1, 0]], 10.0);
        assert_relative_eq!(means[[1, 1]], 4.0);
    }

    #[test]
    fn test_nearest() {
        let data = arr2(&[[0.0], [4.0], [9.0]]);
        let centers = arr2(&[[1.0], [8.0]]);
        let (assignment, distances) = nearest(data.view(), centers.view());
        assert_eq!(assignment, vec![0, 1, 1]);
        assert_relative_eq!(distances[0], 1.0);
        assert_relative_eq!(distances[1], 9.0);
        assert_relative_eq!(distances[2], 1.0);
    }
}
