use serde::Serialize;

use crate::dataset::config::validate_test_ratio;
use crate::dataset::sample::Dataset;
use crate::error::Result;
use crate::math::random::RandomSource;

/// A disjoint train/test partition of a source dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
    /// Positions in the source dataset, in the order they appear in `train`.
    pub train_indices: Vec<usize>,
    /// Positions in the source dataset, in the order they appear in `test`.
    pub test_indices: Vec<usize>,
}

/// Shuffles `0..n` with Fisher-Yates and holds out the first
/// `floor(n * test_ratio)` positions as the test set.
///
/// The source dataset is only read. `test_ratio` must lie strictly between
/// 0 and 1.
pub fn split<R: RandomSource + ?Sized>(dataset: &Dataset, test_ratio: f64, rng: &mut R) -> Result<Split> {
    validate_test_ratio(test_ratio)?;

    let n = dataset.len();
    let order = permutation(n, rng);
    let n_test = (n as f64 * test_ratio).floor() as usize;

    let (test_indices, train_indices) = order.split_at(n_test);
    let test_indices = test_indices.to_vec();
    let train_indices = train_indices.to_vec();

    tracing::debug!(
        train = train_indices.len(),
        test = test_indices.len(),
        test_ratio,
        "split dataset"
    );

    Ok(Split {
        train: dataset.subset(&train_indices),
        test: dataset.subset(&test_indices),
        train_indices,
        test_indices,
    })
}

/// A uniformly random permutation of `0..n`.
pub fn permutation<R: RandomSource + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.index(i + 1);
        indices.swap(i, j);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random::ReplaySource;

    fn numbered(n: usize) -> Dataset {
        Dataset::from_class_indices(
            (0..n).map(|i| vec![i as f64, 0.0]).collect(),
            &vec![0; n],
            1,
        ).unwrap()
    }

    #[test]
    fn permutation_is_a_permutation() {
        let mut src = ReplaySource::new(vec![0.9, 0.1, 0.5, 0.3]);
        let mut p = permutation(7, &mut src);
        p.sort_unstable();
        assert_eq!(p, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn top_draws_leave_order_untouched() {
        // index(i + 1) with a draw of 1.0 always picks i, so no swap moves anything.
        let mut src = ReplaySource::new(vec![1.0]);
        assert_eq!(permutation(5, &mut src), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn small_dataset_can_have_empty_test_set() {
        let ds = numbered(3);
        let s = split(&ds, 0.2, &mut ReplaySource::new(vec![0.5])).unwrap();
        assert_eq!(s.test.len(), 0);
        assert_eq!(s.train.len(), 3);
    }

    #[test]
    fn subsets_follow_indices() {
        let ds = numbered(10);
        let s = split(&ds, 0.3, &mut ReplaySource::new(vec![0.42, 0.07, 0.88])).unwrap();
        for (sample, &i) in s.test.samples().iter().zip(&s.test_indices) {
            assert_eq!(sample.features[0], i as f64);
        }
        for (sample, &i) in s.train.samples().iter().zip(&s.train_indices) {
            assert_eq!(sample.features[0], i as f64);
        }
    }
}
