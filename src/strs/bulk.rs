//! Bulk reordering operations (§4.8): `argsort`, `sorted`, `shuffled`,
//! `sample`. All three reordering operations share one `reorder` helper that
//! builds a `Fragmented` collection from a permutation of spans — none of
//! them need to touch the backing tape bytes.

use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::alloc::default_allocator;
use crate::error::{Error, Result};
use crate::kernel;

use super::layout::Strs;

/// A seeded RNG when `seed` is given; otherwise one seeded from the OS
/// entropy pool, standing in for "clock-based seed" in an idiomatic way.
fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(OsRng.next_u64()),
    }
}

fn reorder(s: &Strs, order: &[usize]) -> Strs {
    let spans = order.iter().map(|&i| s.span_at(i)).collect();
    Strs::Fragmented { spans, allocator: default_allocator() }
}

/// A permutation of `[0, count)` that puts the collection into non-decreasing
/// lexicographic order, or non-increasing when `reverse` is set. Stable:
/// equal keys retain their input order either way — sorting with a flipped
/// comparator rather than reversing the ascending permutation is what
/// preserves that guarantee for ties.
pub fn argsort(s: &Strs, reverse: bool) -> Vec<usize> {
    if !reverse {
        return kernel::sequence_argsort(s.count(), |i| s.bytes_at(i));
    }
    let mut order: Vec<usize> = (0..s.count()).collect();
    order.sort_by(|&a, &b| s.bytes_at(a).cmp(s.bytes_at(b)).reverse());
    order
}

/// A new collection holding the same elements in sorted order.
pub fn sorted(s: &Strs, reverse: bool) -> Strs {
    reorder(s, &argsort(s, reverse))
}

/// A new collection holding the same elements in a random order. A `seed`
/// makes the shuffle reproducible; without one, randomness is sourced from
/// the system entropy pool.
pub fn shuffled(s: &Strs, seed: Option<u64>) -> Strs {
    let mut order: Vec<usize> = (0..s.count()).collect();
    order.shuffle(&mut rng_from_seed(seed));
    reorder(s, &order)
}

/// A new collection holding `n` elements drawn uniformly *with replacement*
/// (by design — duplicates are possible even for `n <= count`). Errors only
/// when `n > 0` and the collection is empty, since nothing can be drawn.
pub fn sample(s: &Strs, n: usize, seed: Option<u64>) -> Result<Strs> {
    let count = s.count();
    if n > 0 && count == 0 {
        return Err(Error::InvalidArgument("cannot sample from an empty collection".to_string()));
    }
    let mut rng = rng_from_seed(seed);
    let order: Vec<usize> = (0..n).map(|_| rng.gen_range(0..count)).collect();
    Ok(reorder(s, &order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strs::construct::from_sequence_copy;

    fn sample_strs() -> Strs {
        let items: Vec<&[u8]> = vec![b"banana", b"apple", b"cherry"];
        from_sequence_copy(items.into_iter())
    }

    #[test]
    fn argsort_orders_lexicographically() {
        let s = sample_strs();
        assert_eq!(argsort(&s, false), vec![1, 0, 2]);
    }

    #[test]
    fn argsort_reverse_preserves_tie_order() {
        let items: Vec<&[u8]> = vec![b"a", b"a", b"b"];
        let s = from_sequence_copy(items.into_iter());
        assert_eq!(argsort(&s, true), vec![2, 0, 1]);
    }

    #[test]
    fn sorted_applies_the_permutation() {
        let s = sample_strs();
        let got = sorted(&s, false);
        assert_eq!(got.bytes_at(0), b"apple");
        assert_eq!(got.bytes_at(1), b"banana");
        assert_eq!(got.bytes_at(2), b"cherry");
    }

    #[test]
    fn shuffled_with_seed_is_reproducible() {
        let s = sample_strs();
        let a = shuffled(&s, Some(42));
        let b = shuffled(&s, Some(42));
        let a_bytes: Vec<&[u8]> = (0..a.count()).map(|i| a.bytes_at(i)).collect();
        let b_bytes: Vec<&[u8]> = (0..b.count()).map(|i| b.bytes_at(i)).collect();
        assert_eq!(a_bytes, b_bytes);
    }

    #[test]
    fn shuffled_preserves_multiset() {
        let s = sample_strs();
        let shuffled_s = shuffled(&s, Some(7));
        let mut got: Vec<Vec<u8>> = (0..shuffled_s.count()).map(|i| shuffled_s.bytes_at(i).to_vec()).collect();
        got.sort();
        assert_eq!(got, vec![b"apple".to_vec(), b"banana".to_vec(), b"cherry".to_vec()]);
    }

    #[test]
    fn sample_rejects_drawing_from_empty_collection() {
        let s = Strs::Fragmented { spans: Vec::new(), allocator: default_allocator() };
        assert!(sample(&s, 1, Some(1)).is_err());
    }

    #[test]
    fn sample_can_exceed_collection_length_with_replacement() {
        let s = sample_strs();
        let got = sample(&s, 5, Some(1)).unwrap();
        assert_eq!(got.count(), 5);
        for i in 0..got.count() {
            assert!([b"banana".as_slice(), b"apple".as_slice(), b"cherry".as_slice()].contains(&got.bytes_at(i)));
        }
    }

    #[test]
    fn sample_zero_from_empty_is_fine() {
        let s = Strs::Fragmented { spans: Vec::new(), allocator: default_allocator() };
        let got = sample(&s, 0, Some(1)).unwrap();
        assert!(got.is_empty());
    }
}
