//! # minikmeans-rs
//!
//! A small k-means clustering library built on ndarray, with pluggable
//! distance metrics and the scoring functions needed to evaluate the
//! resulting partitions.
//!
//! ## Features
//!
//! - **Lloyd's algorithm**: iterative assignment/update with a configurable
//!   convergence tolerance and iteration cap
//! - **Two initializations**: uniform random sampling or kmeans++
//!   (D²-weighted) seeding
//! - **Pluggable metrics**: fit under Euclidean, Manhattan, Chebyshev, or
//!   any custom distance function
//! - **scikit-learn-shaped API**: `fit()`, `predict()`, `fit_predict()`
//! - **Scoring functions**: `accuracy`, `precision`, `recall`, `f1`, `mse`
//!
//! ## Example
//!
//! ```rust
//! use minikmeans_rs::{KMeans, KMeansConfig, InitMethod};
//! use ndarray::array;
//!
//! let data = array![
//!     [1.0, 1.0],
//!     [1.0, 2.0],
//!     [2.0, 1.0],
//!     [9.0, 9.0],
//!     [9.0, 10.0],
//!     [10.0, 9.0],
//! ];
//!
//! let config = KMeansConfig::new(2)
//!     .with_init(InitMethod::KMeansPlusPlus)
//!     .with_seed(42);
//!
//! let mut kmeans = KMeans::with_config(config);
//! let labels = kmeans.fit_predict(&data.view()).unwrap();
//!
//! assert_eq!(labels.len(), 6);
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[3], labels[4]);
//! ```
//!
//! ## Custom distance metric
//!
//! ```rust
//! use minikmeans_rs::{KMeans, KMeansConfig};
//! use minikmeans_rs::distance::manhattan_distance;
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
//!
//! let config = KMeansConfig::new(2).with_distance(manhattan_distance);
//! let mut kmeans = KMeans::with_config(config);
//! kmeans.fit(&data.view()).unwrap();
//!
//! assert!(kmeans.converged().unwrap());
//! ```

mod algorithm;
mod config;
mod error;
mod kmeans;

pub mod distance;
pub mod metrics;

pub use config::{InitMethod, KMeansConfig};
pub use error::KMeansError;
pub use kmeans::KMeans;
