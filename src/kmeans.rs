use crate::algorithm::{assign_labels, run_lloyd};
use crate::config::KMeansConfig;
use crate::distance::{euclidean_distance, nearest_centroid, squared_euclidean_distance};
use crate::error::KMeansError;
use ndarray::{Array1, Array2, ArrayView2};

/// State populated by a successful fit
struct FittedState {
    centroids: Array2<f64>,
    labels: Array1<usize>,
    n_iterations: usize,
    converged: bool,
}

/// K-means clustering model with a scikit-learn-shaped API.
///
/// The model starts unfitted; a successful [`fit`](KMeans::fit) stores the
/// centroid set and the training-label assignment, after which
/// [`predict`](KMeans::predict) maps new samples to their nearest centroid.
///
/// # Example
///
/// ```
/// use minikmeans_rs::KMeans;
/// use ndarray::array;
///
/// let data = array![
///     [1.0, 1.0],
///     [1.2, 0.8],
///     [9.0, 9.0],
///     [8.8, 9.2],
/// ];
///
/// let mut kmeans = KMeans::new(2);
/// let labels = kmeans.fit_predict(&data.view()).unwrap();
///
/// assert_eq!(labels.len(), 4);
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[2], labels[3]);
/// assert_ne!(labels[0], labels[2]);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features, established by the first fit
    d: usize,

    /// None until fit succeeds
    fitted: Option<FittedState>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        assert!(k > 0, "k must be greater than 0");

        Self {
            config: KMeansConfig::new(k),
            d: 0,
            fitted: None,
        }
    }

    /// Create a new KMeans instance with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        Self {
            config,
            d: 0,
            fitted: None,
        }
    }

    /// Fit the model to the data using Lloyd's algorithm.
    ///
    /// A successful fit fully replaces any previous centroids and labels.
    /// Returns `&mut Self` for method chaining.
    ///
    /// # Errors
    ///
    /// - [`KMeansError::InvalidK`] if `k` is 0
    /// - [`KMeansError::InsufficientData`] if the number of samples is less
    ///   than `k`
    /// - [`KMeansError::InvalidDimensions`] if the feature count differs
    ///   from a previous fit on this instance
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<&mut Self, KMeansError> {
        let n_features = data.ncols();

        // Set dimensions on first call, validate on subsequent calls
        if self.d == 0 {
            self.d = n_features;
        } else if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        let fit = run_lloyd(data, &self.config)?;

        self.fitted = Some(FittedState {
            centroids: fit.centroids,
            labels: fit.labels,
            n_iterations: fit.n_iterations,
            converged: fit.converged,
        });
        Ok(self)
    }

    /// Predict cluster assignments for new data.
    ///
    /// Prediction always measures Euclidean distance to the centroids,
    /// independent of the metric used during fitting.
    ///
    /// # Errors
    ///
    /// - [`KMeansError::NotFitted`] if the model has not been fitted yet
    /// - [`KMeansError::InvalidDimensions`] if the feature count differs
    ///   from the training data
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let state = self.fitted.as_ref().ok_or(KMeansError::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        Ok(assign_labels(
            data,
            &state.centroids.view(),
            euclidean_distance,
        ))
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.fit(data)?;
        self.predict(data)
    }

    /// Within-cluster sum of squared Euclidean distances for the given data.
    ///
    /// # Errors
    ///
    /// Same conditions as [`predict`](KMeans::predict).
    pub fn inertia(&self, data: &ArrayView2<f64>) -> Result<f64, KMeansError> {
        let state = self.fitted.as_ref().ok_or(KMeansError::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        let centroids = state.centroids.view();
        Ok((0..data.nrows())
            .map(|i| nearest_centroid(&data.row(i), &centroids, squared_euclidean_distance).1)
            .sum())
    }

    /// Centroids of the fitted model, or `None` before fitting.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.fitted.as_ref().map(|s| &s.centroids)
    }

    /// Training-data cluster assignments, or `None` before fitting.
    pub fn labels(&self) -> Option<&Array1<usize>> {
        self.fitted.as_ref().map(|s| &s.labels)
    }

    /// Number of iterations the last fit ran, or `None` before fitting.
    pub fn n_iterations(&self) -> Option<usize> {
        self.fitted.as_ref().map(|s| s.n_iterations)
    }

    /// Whether the last fit converged before exhausting `max_iters`,
    /// or `None` before fitting.
    pub fn converged(&self) -> Option<bool> {
        self.fitted.as_ref().map(|s| s.converged)
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features (0 before the first fit).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
