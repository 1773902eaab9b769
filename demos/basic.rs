//! Basic example demonstrating minikmeans-rs usage
//!
//! Run with: cargo run --example basic --release

use minikmeans_rs::{InitMethod, KMeans, KMeansConfig};
use ndarray::{array, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    println!("=== minikmeans-rs example ===\n");

    // Generate synthetic data: 3 clusters in 2D for easy visualization
    let n_samples = 300;
    let n_features = 2;

    println!("Generating {} samples with {} features...", n_samples, n_features);

    let mut data = Array2::<f64>::zeros((n_samples, n_features));
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];

    for i in 0..n_samples {
        let cluster_idx = i % 3;
        let noise = Array2::random((1, n_features), Uniform::new(-1.0, 1.0));
        data[[i, 0]] = centers[cluster_idx][0] + noise[[0, 0]];
        data[[i, 1]] = centers[cluster_idx][1] + noise[[0, 1]];
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    // Configure and run k-means
    let config = KMeansConfig::new(3)
        .with_init(InitMethod::KMeansPlusPlus)
        .with_seed(42)
        .with_verbose(true);

    let mut kmeans = KMeans::with_config(config);
    kmeans.fit(&data.view()).unwrap();

    println!("\nFitted centroids:");
    for (i, centroid) in kmeans.centroids().unwrap().outer_iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, centroid[0], centroid[1]);
    }

    println!(
        "\nConverged: {} (after {} iterations)",
        kmeans.converged().unwrap(),
        kmeans.n_iterations().unwrap()
    );
    println!("Inertia: {:.4}", kmeans.inertia(&data.view()).unwrap());

    // Predict a few new points
    let queries = array![[-5.0, -4.5], [0.5, 4.5], [4.5, -5.5]];
    let labels = kmeans.predict(&queries.view()).unwrap();

    println!("\nPredictions:");
    for (point, label) in queries.outer_iter().zip(labels.iter()) {
        println!("  ({:.1}, {:.1}) -> cluster {}", point[0], point[1], label);
    }
}
