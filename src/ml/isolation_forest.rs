// ============================================================
// Layer 5 — Isolation Forest (diagnostic only)
// ============================================================
// Estimates how many training records look like outliers. The
// result is reported as `anomaly_rate` in the artifact and is
// never used to score readings at predict time.
//
// How it works (Liu, Ting & Zhou, 2008):
//   - Build `n_estimators` random trees, each on a random
//     subsample of `max_samples` rows (without replacement).
//   - Every internal node picks a random feature and a random
//     split value between that feature's min and max.
//   - Outliers are isolated in fewer splits, so their average
//     path length from the root is short.
//
//   score(x) = -2^( -E[h(x)] / c(ψ) )        ψ = subsample size
//
//   c(n) = 2·H(n-1) - 2(n-1)/n                average path length
//   H(i) ≈ ln(i) + 0.5772156649               of an unsuccessful
//                                             BST search
//
// Scores lie in [-1, 0); lower = more anomalous. After fitting,
// the `contamination` quantile of the training scores becomes
// the offset: rows scoring below it are labelled OUTLIER.
//
// All randomness flows from one StdRng seeded with `seed`, so
// the same rows and settings always give the same labels.
//
// Reference: Liu et al. (2008) Isolation Forest
//            rand crate documentation (SeedableRng, seq::index)

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::domain::error::{AnomalyError, Result};
use crate::domain::traits::{OutlierDetector, INLIER, OUTLIER};

const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Average path length of an unsuccessful search in a BST of `n` nodes.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2     => 1.0,
        _     => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

// ─── IsolationTree ────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        value:   f64,
        left:    Box<Node>,
        right:   Box<Node>,
    },
}

/// One randomly grown isolation tree.
#[derive(Debug, Clone)]
pub struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    /// Grow a tree over `rows[indices]`, stopping at `height_limit`.
    fn grow(rows: &[Vec<f64>], indices: Vec<usize>, height_limit: usize, rng: &mut StdRng) -> Self {
        Self { root: grow_node(rows, indices, 0, height_limit, rng) }
    }

    /// Path length of `row`, with the c(size) correction at the leaf.
    pub fn path_length(&self, row: &[f64]) -> f64 {
        let mut node  = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split { feature, value, left, right } => {
                    node = if row[*feature] <= *value { &**left } else { &**right };
                    depth += 1.0;
                }
            }
        }
    }
}

fn grow_node(
    rows:         &[Vec<f64>],
    indices:      Vec<usize>,
    depth:        usize,
    height_limit: usize,
    rng:          &mut StdRng,
) -> Node {
    if depth >= height_limit || indices.len() <= 1 {
        return Node::Leaf { size: indices.len() };
    }

    // Only features that still vary inside this node can split it
    let n_features = rows[indices[0]].len();
    let ranges: Vec<(usize, f64, f64)> = (0..n_features)
        .filter_map(|j| {
            let (lo, hi) = indices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
                (lo.min(rows[i][j]), hi.max(rows[i][j]))
            });
            (lo < hi).then_some((j, lo, hi))
        })
        .collect();

    if ranges.is_empty() {
        return Node::Leaf { size: indices.len() };
    }

    let (feature, lo, hi) = ranges[rng.gen_range(0..ranges.len())];
    // value ∈ [lo, hi): `<= value` keeps lo on the left, hi on the right,
    // so both children are non-empty
    let value = rng.gen_range(lo..hi);

    let (left, right): (Vec<usize>, Vec<usize>) =
        indices.into_iter().partition(|&i| rows[i][feature] <= value);

    Node::Split {
        feature,
        value,
        left:  Box::new(grow_node(rows, left, depth + 1, height_limit, rng)),
        right: Box::new(grow_node(rows, right, depth + 1, height_limit, rng)),
    }
}

// ─── IsolationForest ──────────────────────────────────────────────────────────
/// Seeded isolation forest with a contamination-based decision offset.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    n_estimators:  usize,
    max_samples:   usize,
    contamination: f64,
    seed:          u64,

    // Set by fit()
    trees:       Vec<IsolationTree>,
    sample_size: usize,
    offset:      f64,
}

impl IsolationForest {
    /// Create an unfitted forest.
    ///
    /// `max_samples` is capped at the number of rows when fitting.
    pub fn new(n_estimators: usize, max_samples: usize, contamination: f64, seed: u64) -> Self {
        Self {
            n_estimators,
            max_samples,
            contamination,
            seed,
            trees:       Vec::new(),
            sample_size: 0,
            offset:      0.0,
        }
    }

    /// Score threshold fixed by fit(); rows scoring below it are outliers.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(AnomalyError::InvalidModel(
                "isolation forest not fitted: call fit() first".into(),
            ));
        }
        Ok(())
    }

    fn score_row(&self, row: &[f64]) -> f64 {
        let mean_path = self.trees.iter().map(|t| t.path_length(row)).sum::<f64>()
            / self.trees.len() as f64;
        let norm = average_path_length(self.sample_size);
        if norm == 0.0 {
            // A single-row subsample isolates nothing; treat every row alike
            return -1.0;
        }
        -(2f64).powf(-mean_path / norm)
    }
}

impl OutlierDetector for IsolationForest {
    fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()> {
        if rows.is_empty() {
            return Err(AnomalyError::InsufficientData { required: 1, got: 0 });
        }
        if self.n_estimators == 0 || self.max_samples == 0 {
            return Err(AnomalyError::InvalidConfig {
                name:   "n_estimators/max_samples".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(AnomalyError::InvalidConfig {
                name:   "contamination".into(),
                reason: format!("must be in (0, 0.5], got {}", self.contamination),
            });
        }

        let mut rng       = StdRng::seed_from_u64(self.seed);
        let sample_size   = self.max_samples.min(rows.len());
        let height_limit  = (sample_size.max(2) as f64).log2().ceil() as usize;

        self.trees = (0..self.n_estimators)
            .map(|_| {
                let subset = index::sample(&mut rng, rows.len(), sample_size).into_vec();
                IsolationTree::grow(rows, subset, height_limit, &mut rng)
            })
            .collect();
        self.sample_size = sample_size;

        // Offset = contamination quantile of the training scores
        let mut scores: Vec<f64> = rows.iter().map(|r| self.score_row(r)).collect();
        scores.sort_by(|a, b| a.total_cmp(b));
        self.offset = percentile(&scores, self.contamination);

        tracing::debug!(
            "Isolation forest fitted: {} trees, subsample {}, height limit {}, offset {:.6}",
            self.trees.len(),
            sample_size,
            height_limit,
            self.offset,
        );
        Ok(())
    }

    fn score_samples(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        self.ensure_fitted()?;
        Ok(rows.iter().map(|r| self.score_row(r)).collect())
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i8>> {
        let scores = self.score_samples(rows)?;
        Ok(scores
            .into_iter()
            .map(|s| if s < self.offset { OUTLIER } else { INLIER })
            .collect())
    }
}

/// Linearly interpolated quantile `q ∈ [0, 1]` of an ascending slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos  = q * (sorted.len() - 1) as f64;
    let lo   = pos.floor() as usize;
    let hi   = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
