use ndarray::{ArrayView1, ArrayView2};

/// Signature of a pluggable distance metric.
///
/// A metric must be commutative, non-negative, and return zero iff the two
/// vectors are equal. The convergence check relies on those properties.
pub type DistanceFn = fn(&ArrayView1<f64>, &ArrayView1<f64>) -> f64;

/// Euclidean (L2) distance: `sqrt(sum((a_i - b_i)^2))`.
///
/// This is the default metric for fitting and the fixed metric for
/// prediction.
#[inline]
pub fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    squared_euclidean_distance(a, b).sqrt()
}

/// Squared Euclidean distance: `sum((a_i - b_i)^2)`.
///
/// Same nearest-neighbor ranking as [`euclidean_distance`] without the
/// `sqrt`. Used for kmeans++ weighting and inertia.
#[inline]
pub fn squared_euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Manhattan (L1) distance: `sum(|a_i - b_i|)`.
#[inline]
pub fn manhattan_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// Chebyshev (L-infinity) distance: `max(|a_i - b_i|)`.
#[inline]
pub fn chebyshev_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Find the centroid nearest to `sample` under the given metric.
///
/// Returns the centroid index and its distance. Ties are broken by the
/// lowest index (first minimum).
pub fn nearest_centroid(
    sample: &ArrayView1<f64>,
    centroids: &ArrayView2<f64>,
    distance: DistanceFn,
) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (idx, centroid) in centroids.outer_iter().enumerate() {
        let d = distance(sample, &centroid);
        if d < best_dist {
            best_dist = d;
            best_idx = idx;
        }
    }

    (best_idx, best_dist)
}
