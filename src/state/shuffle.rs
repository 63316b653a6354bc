/// Fisher–Yates shuffle that leaves the caller's slice untouched
use rand::Rng;

/// Return a uniformly shuffled copy of `items` using the thread RNG
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::rng())
}

/// Return a shuffled copy of `items` drawing from `rng`.
///
/// Walks from the last index down to 1, swapping each slot with a uniform
/// pick from `[0, i]`. With an unbiased source every permutation is equally
/// likely.
pub fn shuffled_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
