use crate::config::{InitMethod, KMeansConfig};
use crate::distance::{nearest_centroid, DistanceFn};
use crate::error::KMeansError;
use ndarray::{Array1, Array2, ArrayView2};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;

/// Result of one full run of Lloyd's algorithm
pub struct KMeansFit {
    pub centroids: Array2<f64>,
    pub labels: Array1<usize>,
    pub n_iterations: usize,
    pub converged: bool,
}

/// Run Lloyd's algorithm: alternate assignment and centroid-update steps
/// until the centroid set stabilizes or the iteration cap is reached.
pub fn run_lloyd(data: &ArrayView2<f64>, config: &KMeansConfig) -> Result<KMeansFit, KMeansError> {
    let n_samples = data.nrows();
    let n_features = data.ncols();
    let k = config.k;

    // Validate inputs
    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if n_samples < k {
        return Err(KMeansError::InsufficientData(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    // Initialize RNG
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    if config.verbose {
        eprintln!(
            "Training k-means: {} samples, {} features, {} clusters ({:?} init)",
            n_samples, n_features, k, config.init
        );
    }

    let mut centroids = match config.init {
        InitMethod::Random => init_random(data, k, &mut rng),
        InitMethod::KMeansPlusPlus => init_kmeans_plus_plus(data, k, config.distance, &mut rng),
    };

    // Main k-means loop
    let mut labels = Array1::zeros(n_samples);
    let mut n_iterations = 0;
    let mut converged = false;

    for iteration in 0..config.max_iters {
        let iter_start = Instant::now();
        n_iterations = iteration + 1;

        // Assignment step
        labels = assign_labels(data, &centroids.view(), config.distance);

        // Update step: each centroid becomes the mean of its assigned samples
        let new_centroids = update_centroids(data, &labels, &centroids.view());

        // Convergence check
        let shift = centroid_shift(&centroids.view(), &new_centroids.view());
        centroids = new_centroids;

        if config.verbose {
            let iter_time = iter_start.elapsed().as_secs_f64();
            eprintln!(
                "  Iteration {}/{}: shift = {:.6}, time = {:.4}s",
                iteration + 1,
                config.max_iters,
                shift,
                iter_time
            );
        }

        if config.tol >= 0.0 && shift < config.tol {
            converged = true;
            if config.verbose {
                eprintln!(
                    "  Converged after {} iterations (shift {:.6} < tol {:.6})",
                    iteration + 1,
                    shift,
                    config.tol
                );
            }
            break;
        }
    }

    Ok(KMeansFit {
        centroids,
        labels,
        n_iterations,
        converged,
    })
}

/// Assign each sample the index of its nearest centroid under the given
/// metric (first-minimum tie-break)
pub(crate) fn assign_labels(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    distance: DistanceFn,
) -> Array1<usize> {
    let n_samples = data.nrows();

    let labels: Vec<usize> = (0..n_samples)
        .into_par_iter()
        .map(|i| nearest_centroid(&data.row(i), centroids, distance).0)
        .collect();

    Array1::from_vec(labels)
}

/// Recompute each centroid as the coordinate-wise mean of its assigned
/// samples. A cluster with no assigned samples keeps its previous centroid,
/// so no NaNs ever enter the centroid set.
pub(crate) fn update_centroids(
    data: &ArrayView2<f64>,
    labels: &Array1<usize>,
    prev_centroids: &ArrayView2<f64>,
) -> Array2<f64> {
    let k = prev_centroids.nrows();
    let n_features = prev_centroids.ncols();

    let mut sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut counts = vec![0usize; k];

    for (i, &cluster_idx) in labels.iter().enumerate() {
        counts[cluster_idx] += 1;
        let mut sum_row = sums.row_mut(cluster_idx);
        sum_row += &data.row(i);
    }

    let mut centroids = prev_centroids.to_owned();
    for cluster_idx in 0..k {
        if counts[cluster_idx] > 0 {
            let mean = &sums.row(cluster_idx) / counts[cluster_idx] as f64;
            centroids.row_mut(cluster_idx).assign(&mean);
        }
    }

    centroids
}

/// Total L2 movement of the centroid set between two iterations
pub(crate) fn centroid_shift(old: &ArrayView2<f64>, new: &ArrayView2<f64>) -> f64 {
    old.outer_iter()
        .zip(new.outer_iter())
        .map(|(o, n)| crate::distance::euclidean_distance(&o, &n))
        .sum()
}

/// Initialize centroids by choosing k distinct data points uniformly at
/// random without replacement
fn init_random(data: &ArrayView2<f64>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f64> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let indices: Vec<usize> = (0..n_samples).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    let mut centroids = Array2::zeros((k, n_features));
    for (centroid_idx, &data_idx) in selected.iter().enumerate() {
        centroids.row_mut(centroid_idx).assign(&data.row(data_idx));
    }

    centroids
}

/// kmeans++ initialization: the first centroid is a uniform random sample;
/// each subsequent one is drawn with probability proportional to its squared
/// distance to the nearest already-chosen centroid.
fn init_kmeans_plus_plus(
    data: &ArrayView2<f64>,
    k: usize,
    distance: DistanceFn,
    rng: &mut ChaCha8Rng,
) -> Array2<f64> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let mut centroids = Array2::zeros((k, n_features));

    let first_idx = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&data.row(first_idx));

    // Squared distance from each sample to its nearest chosen centroid,
    // refined incrementally as centroids are added
    let mut min_sq_dists = vec![f64::INFINITY; n_samples];

    for centroid_idx in 1..k {
        let latest = centroids.row(centroid_idx - 1);
        for (i, min_sq) in min_sq_dists.iter_mut().enumerate() {
            let d = distance(&data.row(i), &latest);
            let sq = d * d;
            if sq < *min_sq {
                *min_sq = sq;
            }
        }

        // All weights are zero when every remaining point coincides with a
        // chosen centroid; fall back to a uniform draw
        let next_idx = match WeightedIndex::new(min_sq_dists.iter()) {
            Ok(weighted) => weighted.sample(rng),
            Err(_) => rng.gen_range(0..n_samples),
        };
        centroids.row_mut(centroid_idx).assign(&data.row(next_idx));
    }

    centroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{euclidean_distance, squared_euclidean_distance};
    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    fn total_inertia(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> f64 {
        (0..data.nrows())
            .map(|i| nearest_centroid(&data.row(i), centroids, squared_euclidean_distance).1)
            .sum()
    }

    #[test]
    fn test_init_random_shape_and_membership() {
        let data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let centroids = init_random(&data.view(), 5, &mut rng);

        assert_eq!(centroids.nrows(), 5);
        assert_eq!(centroids.ncols(), 8);

        // Every initial centroid must be one of the data points
        for centroid in centroids.outer_iter() {
            let is_sample = data
                .outer_iter()
                .any(|row| euclidean_distance(&row, &centroid) == 0.0);
            assert!(is_sample);
        }
    }

    #[test]
    fn test_init_random_distinct_points() {
        let data = Array2::random((20, 4), Uniform::new(-1.0, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        // k == n forces every sample to be chosen exactly once
        let centroids = init_random(&data.view(), 20, &mut rng);

        for i in 0..20 {
            let c_i = centroids.row(i);
            let duplicates = centroids
                .outer_iter()
                .filter(|c_j| euclidean_distance(c_j, &c_i) == 0.0)
                .count();
            assert_eq!(duplicates, 1);
        }
    }

    #[test]
    fn test_init_kmeans_plus_plus_spreads_centroids() {
        // Two tight, well-separated groups: kmeans++ must pick one centroid
        // from each
        let data = array![
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [100.0, 100.0],
            [100.1, 100.0],
            [100.0, 100.1],
        ];

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let centroids =
                init_kmeans_plus_plus(&data.view(), 2, euclidean_distance, &mut rng);

            let gap = euclidean_distance(&centroids.row(0), &centroids.row(1));
            assert!(gap > 50.0, "seed {}: centroids not spread, gap {}", seed, gap);
        }
    }

    #[test]
    fn test_init_kmeans_plus_plus_duplicate_points() {
        // All points identical: weighted sampling degenerates, uniform
        // fallback must kick in
        let data = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let centroids = init_kmeans_plus_plus(&data.view(), 3, euclidean_distance, &mut rng);

        assert_eq!(centroids.nrows(), 3);
        for centroid in centroids.outer_iter() {
            assert_eq!(centroid[0], 1.0);
            assert_eq!(centroid[1], 1.0);
        }
    }

    #[test]
    fn test_assign_labels_first_minimum() {
        let data = array![[0.0, 0.0], [10.0, 10.0], [5.0, 5.0]];
        let centroids = array![[0.0, 0.0], [10.0, 10.0]];

        let labels = assign_labels(&data.view(), &centroids.view(), euclidean_distance);

        assert_eq!(labels[0], 0);
        assert_eq!(labels[1], 1);
        // (5,5) is equidistant; the lower index wins
        assert_eq!(labels[2], 0);
    }

    #[test]
    fn test_update_centroids_means() {
        let data = array![[0.0, 0.0], [2.0, 0.0], [10.0, 10.0]];
        let labels = Array1::from_vec(vec![0, 0, 1]);
        let prev = array![[1.0, 1.0], [9.0, 9.0]];

        let centroids = update_centroids(&data.view(), &labels, &prev.view());

        assert_eq!(centroids[[0, 0]], 1.0);
        assert_eq!(centroids[[0, 1]], 0.0);
        assert_eq!(centroids[[1, 0]], 10.0);
        assert_eq!(centroids[[1, 1]], 10.0);
    }

    #[test]
    fn test_update_centroids_empty_cluster_unchanged() {
        let data = array![[0.0, 0.0], [2.0, 0.0]];
        let labels = Array1::from_vec(vec![0, 0]);
        let prev = array![[1.0, 1.0], [50.0, 50.0]];

        let centroids = update_centroids(&data.view(), &labels, &prev.view());

        // Cluster 1 got no samples; its centroid must stay where it was
        assert_eq!(centroids[[1, 0]], 50.0);
        assert_eq!(centroids[[1, 1]], 50.0);
        assert!(!centroids.iter().any(|v| v.is_nan()));
    }

    #[test]
    fn test_centroid_shift() {
        let old = array![[0.0, 0.0], [1.0, 1.0]];
        let new = array![[1.0, 0.0], [1.0, 1.0]];

        let shift = centroid_shift(&old.view(), &new.view());
        assert!((shift - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_run_lloyd_basic() {
        let data = Array2::random((200, 8), Uniform::new(-1.0, 1.0));
        let config = KMeansConfig::new(5).with_seed(42);

        let fit = run_lloyd(&data.view(), &config).unwrap();

        assert_eq!(fit.centroids.nrows(), 5);
        assert_eq!(fit.centroids.ncols(), 8);
        assert_eq!(fit.labels.len(), 200);
        for &label in fit.labels.iter() {
            assert!(label < 5);
        }
    }

    #[test]
    fn test_run_lloyd_invalid_k() {
        let data = Array2::random((10, 2), Uniform::new(-1.0, 1.0));
        let config = KMeansConfig::new(0);

        let result = run_lloyd(&data.view(), &config);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_run_lloyd_insufficient_data() {
        let data = Array2::random((3, 2), Uniform::new(-1.0, 1.0));
        let config = KMeansConfig::new(5);

        let result = run_lloyd(&data.view(), &config);
        assert!(matches!(result, Err(KMeansError::InsufficientData(_))));
    }

    #[test]
    fn test_converged_centroids_are_a_fixed_point() {
        let data = array![
            [1.0, 1.0],
            [1.0, 2.0],
            [2.0, 1.0],
            [1.0, 10.0],
            [2.0, 10.0],
            [2.0, 9.0],
            [9.0, 9.0],
            [9.0, 10.0],
        ];
        let config = KMeansConfig::new(3)
            .with_init(InitMethod::KMeansPlusPlus)
            .with_seed(3);

        let fit = run_lloyd(&data.view(), &config).unwrap();
        assert!(fit.converged);

        // One more assignment + update step must not move any centroid
        let labels = assign_labels(&data.view(), &fit.centroids.view(), euclidean_distance);
        let next = update_centroids(&data.view(), &labels, &fit.centroids.view());

        let shift = centroid_shift(&fit.centroids.view(), &next.view());
        assert!(shift < 1e-9, "converged centroids moved by {}", shift);
    }

    #[test]
    fn test_inertia_non_increasing_across_updates() {
        for seed in [1u64, 17, 99] {
            let data = Array2::random((150, 4), Uniform::new(-5.0, 5.0));
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut centroids = init_random(&data.view(), 6, &mut rng);

            let mut prev_inertia = total_inertia(&data.view(), &centroids.view());
            for _ in 0..15 {
                let labels = assign_labels(&data.view(), &centroids.view(), euclidean_distance);
                centroids = update_centroids(&data.view(), &labels, &centroids.view());

                let inertia = total_inertia(&data.view(), &centroids.view());
                assert!(
                    inertia <= prev_inertia + 1e-9,
                    "inertia increased: {} -> {}",
                    prev_inertia,
                    inertia
                );
                prev_inertia = inertia;
            }
        }
    }
}
