use crate::distance::{euclidean_distance, DistanceFn};
use crate::error::KMeansError;
use std::str::FromStr;

/// Centroid initialization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMethod {
    /// Choose k distinct data points uniformly at random.
    Random,
    /// kmeans++: choose the first centroid uniformly at random, then each
    /// subsequent one with probability proportional to its squared distance
    /// to the nearest already-chosen centroid.
    KMeansPlusPlus,
}

impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitMethod::Random),
            "kmeans++" => Ok(InitMethod::KMeansPlusPlus),
            other => Err(KMeansError::UnknownInit(other.to_string())),
        }
    }
}

/// Configuration for the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Centroid initialization strategy
    pub init: InitMethod,

    /// Maximum number of iterations
    pub max_iters: usize,

    /// Convergence tolerance. When the total centroid shift is below this
    /// threshold, the algorithm stops early. Set to a negative value to
    /// disable early stopping.
    pub tol: f64,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Distance metric used during fitting. Prediction always uses
    /// Euclidean distance.
    pub distance: DistanceFn,

    /// Print verbose output during training
    pub verbose: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            init: InitMethod::Random,
            max_iters: 300,
            tol: 1e-10,
            seed: 0,
            distance: euclidean_distance,
            verbose: false,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the initialization strategy
    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the fitting distance metric
    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
