//! Bubble sort
//!
//! No early exit when a pass makes no swaps: the fixture should cost the
//! full O(n²) comparisons whatever the input looks like.

use rand::Rng;

/// Sort `items` in place with adjacent swaps
pub fn bubble_sort<T: PartialOrd>(items: &mut [T]) {
    let n = items.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if items[j] > items[j + 1] {
                items.swap(j, j + 1);
            }
        }
    }
}

/// True when every element is `<=` its successor
pub fn is_sorted<T: PartialOrd>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] <= w[1])
}

/// `size` integers drawn uniformly from `[0, size)`
pub fn random_input<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i32> {
    let upper = i32::try_from(size).unwrap_or(i32::MAX).max(1);
    (0..size).map(|_| rng.gen_range(0..upper)).collect()
}
