//! Latent Dirichlet Allocation (LDA)
//!
//! Batch variational Bayes in the style of Hoffman, Blei and Bach (2010).
//! Works on any non-negative document-term matrix, including TF-IDF weights.

use ndarray::{Array1, Array2, Axis};
use rand::prelude::*;
use rand_distr::Gamma;
use statrs::function::gamma::digamma;
use tracing::debug;

use super::TopicError;

/// Shape and scale of the Gamma draws used to initialize parameters
const INIT_GAMMA_SHAPE: f64 = 100.0;
const INIT_GAMMA_SCALE: f64 = 0.01;

/// Keeps normalizers away from zero
const EPS: f64 = f64::EPSILON;

/// LDA model configuration
#[derive(Debug, Clone)]
pub struct LdaConfig {
    /// Number of topics
    pub n_topics: usize,
    /// Document-topic prior (alpha), 1 / n_topics when unset
    pub doc_topic_prior: Option<f64>,
    /// Topic-word prior (eta), 1 / n_topics when unset
    pub topic_word_prior: Option<f64>,
    /// Number of EM passes over the corpus
    pub max_iter: usize,
    /// Per-document E-step iteration cap
    pub max_doc_update_iter: usize,
    /// E-step stops once the mean absolute change falls below this
    pub mean_change_tol: f64,
    /// Random seed for reproducibility
    pub random_seed: u64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            n_topics: 5,
            doc_topic_prior: None,
            topic_word_prior: None,
            max_iter: 10,
            max_doc_update_iter: 100,
            mean_change_tol: 1e-3,
            random_seed: 42,
        }
    }
}

impl LdaConfig {
    /// Create a new configuration with specified number of topics
    pub fn new(n_topics: usize) -> Self {
        Self {
            n_topics,
            ..Default::default()
        }
    }

    /// Set document-topic prior
    pub fn doc_topic_prior(mut self, alpha: f64) -> Self {
        self.doc_topic_prior = Some(alpha);
        self
    }

    /// Set topic-word prior
    pub fn topic_word_prior(mut self, eta: f64) -> Self {
        self.topic_word_prior = Some(eta);
        self
    }

    /// Set number of EM passes
    pub fn max_iter(mut self, n: usize) -> Self {
        self.max_iter = n;
        self
    }

    /// Set random seed
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    fn alpha(&self) -> f64 {
        self.doc_topic_prior.unwrap_or(1.0 / self.n_topics as f64)
    }

    fn eta(&self) -> f64 {
        self.topic_word_prior.unwrap_or(1.0 / self.n_topics as f64)
    }
}

/// Latent Dirichlet Allocation model
#[derive(Debug)]
pub struct LatentDirichletAllocation {
    /// Model configuration
    config: LdaConfig,
    /// Variational topic-word parameters (lambda): n_topics x n_words
    components: Option<Array2<f64>>,
    /// exp(E[log beta]) for the current components
    exp_dirichlet_component: Option<Array2<f64>>,
    /// Passes actually run
    n_iter: usize,
}

impl LatentDirichletAllocation {
    /// Create a new LDA model
    pub fn new(config: LdaConfig) -> Result<Self, TopicError> {
        if config.n_topics == 0 {
            return Err(TopicError::InvalidTopicCount);
        }
        for (name, prior) in [
            ("doc_topic_prior", config.doc_topic_prior),
            ("topic_word_prior", config.topic_word_prior),
        ] {
            if matches!(prior, Some(p) if p <= 0.0) {
                return Err(TopicError::InvalidParameter(format!("{} must be positive", name)));
            }
        }

        Ok(Self {
            config,
            components: None,
            exp_dirichlet_component: None,
            n_iter: 0,
        })
    }

    /// Fit the model on a document-term matrix (documents x terms)
    pub fn fit(&mut self, dtm: &Array2<f64>) -> Result<(), TopicError> {
        let (n_docs, n_words) = dtm.dim();
        if n_docs == 0 {
            return Err(TopicError::EmptyCorpus);
        }
        if n_words == 0 {
            return Err(TopicError::EmptyVocabulary);
        }

        let n_topics = self.config.n_topics;
        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        let gamma = Gamma::new(INIT_GAMMA_SHAPE, INIT_GAMMA_SCALE)
            .map_err(|e| TopicError::InvalidParameter(e.to_string()))?;

        let mut components =
            Array2::from_shape_simple_fn((n_topics, n_words), || gamma.sample(&mut rng));
        let mut exp_component = exp_dirichlet_expectation(&components);

        let docs = sparse_rows(dtm);
        let eta = self.config.eta();

        for iter in 0..self.config.max_iter {
            let initial: Array2<f64> =
                Array2::from_shape_simple_fn((n_docs, n_topics), || gamma.sample(&mut rng));
            let (_, sstats) = self.e_step(&docs, &exp_component, initial, n_words);

            // M-step
            components = sstats * &exp_component + eta;
            exp_component = exp_dirichlet_expectation(&components);
            debug!("LDA pass {}/{}", iter + 1, self.config.max_iter);
        }

        self.n_iter = self.config.max_iter;
        self.components = Some(components);
        self.exp_dirichlet_component = Some(exp_component);
        Ok(())
    }

    /// Per-document variational updates
    ///
    /// Returns the unnormalized document-topic parameters and the sufficient
    /// statistics (not yet multiplied by `exp_component`).
    fn e_step(
        &self,
        docs: &[Vec<(usize, f64)>],
        exp_component: &Array2<f64>,
        mut doc_topic: Array2<f64>,
        n_words: usize,
    ) -> (Array2<f64>, Array2<f64>) {
        let n_topics = self.config.n_topics;
        let alpha = self.config.alpha();
        let mut sstats = Array2::zeros((n_topics, n_words));

        for (d, words) in docs.iter().enumerate() {
            if words.is_empty() {
                doc_topic.row_mut(d).fill(alpha);
                continue;
            }

            let mut gamma_d: Array1<f64> = doc_topic.row(d).to_owned();
            let mut exp_theta = exp_dirichlet_expectation_1d(&gamma_d);
            let mut norm_phi = vec![0.0; words.len()];

            for _ in 0..self.config.max_doc_update_iter {
                let last = gamma_d.clone();

                phi_norms(&mut norm_phi, words, &exp_theta, exp_component);

                for k in 0..n_topics {
                    let weighted: f64 = words
                        .iter()
                        .zip(&norm_phi)
                        .map(|(&(w, count), norm)| count / norm * exp_component[[k, w]])
                        .sum();
                    gamma_d[k] = exp_theta[k] * weighted + alpha;
                }
                exp_theta = exp_dirichlet_expectation_1d(&gamma_d);

                let mean_change =
                    (&last - &gamma_d).mapv(f64::abs).sum() / n_topics as f64;
                if mean_change < self.config.mean_change_tol {
                    break;
                }
            }

            // statistics use the final document-topic expectation
            phi_norms(&mut norm_phi, words, &exp_theta, exp_component);
            for (&(w, count), norm) in words.iter().zip(&norm_phi) {
                for k in 0..n_topics {
                    sstats[[k, w]] += exp_theta[k] * count / norm;
                }
            }
            doc_topic.row_mut(d).assign(&gamma_d);
        }

        (doc_topic, sstats)
    }

    /// Normalized topic distribution per document
    ///
    /// Each row sums to 1.
    pub fn transform(&self, dtm: &Array2<f64>) -> Result<Array2<f64>, TopicError> {
        let exp_component = self
            .exp_dirichlet_component
            .as_ref()
            .ok_or(TopicError::NotFitted)?;
        if dtm.ncols() != exp_component.ncols() {
            return Err(TopicError::DimensionMismatch {
                expected: exp_component.ncols(),
                actual: dtm.ncols(),
            });
        }

        let docs = sparse_rows(dtm);
        let initial = Array2::ones((dtm.nrows(), self.config.n_topics));
        let (mut doc_topic, _) = self.e_step(&docs, exp_component, initial, dtm.ncols());

        for mut row in doc_topic.rows_mut() {
            let total = row.sum();
            row.mapv_inplace(|v| v / total);
        }
        Ok(doc_topic)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, dtm: &Array2<f64>) -> Result<Array2<f64>, TopicError> {
        self.fit(dtm)?;
        self.transform(dtm)
    }

    /// Variational topic-word parameters (n_topics x n_words)
    pub fn components(&self) -> Result<&Array2<f64>, TopicError> {
        self.components.as_ref().ok_or(TopicError::NotFitted)
    }

    /// Topic-word probabilities, each row summing to 1
    pub fn topic_word_distribution(&self) -> Result<Array2<f64>, TopicError> {
        let components = self.components()?;
        let totals = components.sum_axis(Axis(1)).insert_axis(Axis(1));
        Ok(components / &totals)
    }

    /// Indices of the `n` highest-weighted terms of every topic, descending
    pub fn top_term_indices(&self, n: usize) -> Result<Vec<Vec<usize>>, TopicError> {
        let components = self.components()?;
        Ok(components
            .rows()
            .into_iter()
            .map(|row| {
                let mut indices: Vec<usize> = (0..row.len()).collect();
                indices.sort_by(|&a, &b| row[b].total_cmp(&row[a]));
                indices.truncate(n);
                indices
            })
            .collect())
    }

    /// EM passes run by the last fit
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Get model configuration
    pub fn config(&self) -> &LdaConfig {
        &self.config
    }
}

/// Non-zero (term, weight) pairs of each row
/// Normalizer of the word-topic responsibilities for each word in a document
fn phi_norms(
    norms: &mut [f64],
    words: &[(usize, f64)],
    exp_theta: &Array1<f64>,
    exp_component: &Array2<f64>,
) {
    for (slot, &(w, _)) in norms.iter_mut().zip(words) {
        *slot = exp_theta
            .iter()
            .enumerate()
            .map(|(k, theta)| theta * exp_component[[k, w]])
            .sum::<f64>()
            + EPS;
    }
}

fn sparse_rows(dtm: &Array2<f64>) -> Vec<Vec<(usize, f64)>> {
    dtm.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(_, &v)| v > 0.0)
                .map(|(i, &v)| (i, v))
                .collect()
        })
        .collect()
}

/// exp(E[log X]) for X ~ Dir(row), row by row
fn exp_dirichlet_expectation(params: &Array2<f64>) -> Array2<f64> {
    let mut out = params.clone();
    for mut row in out.rows_mut() {
        let total = digamma(row.sum());
        row.mapv_inplace(|v| (digamma(v) - total).exp());
    }
    out
}

fn exp_dirichlet_expectation_1d(params: &Array1<f64>) -> Array1<f64> {
    let total = digamma(params.sum());
    params.mapv(|v| (digamma(v) - total).exp())
}
