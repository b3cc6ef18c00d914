//! End-to-end: argsort/sorted scenario from the contract, plus shuffle and
//! sample over a constructed collection.

use std::collections::HashSet;

use strands::{argsort, from_sequence_copy, sample, shuffled, sorted};

fn bytes_at(s: &strands::Strs, i: usize) -> Vec<u8> {
    s.get(i as i64).unwrap().as_slice().to_vec()
}

#[test]
fn argsort_and_sorted_scenario() {
    let words: Vec<&[u8]> = vec![b"banana", b"apple", b"cherry"];
    let collection = from_sequence_copy(words.iter().copied());

    let order = argsort(&collection, false);
    assert_eq!(order, vec![1, 0, 2]);

    let ordered = sorted(&collection, false);
    let got: Vec<Vec<u8>> = (0..ordered.count()).map(|i| bytes_at(&ordered, i)).collect();
    assert_eq!(got, vec![b"apple".to_vec(), b"banana".to_vec(), b"cherry".to_vec()]);
}

#[test]
fn shuffled_is_reproducible_and_preserves_the_multiset() {
    let words: Vec<&[u8]> = vec![b"a", b"b", b"c", b"d", b"e"];
    let collection = from_sequence_copy(words.iter().copied());

    let first = shuffled(&collection, Some(42));
    let second = shuffled(&collection, Some(42));
    let first_bytes: Vec<Vec<u8>> = (0..first.count()).map(|i| bytes_at(&first, i)).collect();
    let second_bytes: Vec<Vec<u8>> = (0..second.count()).map(|i| bytes_at(&second, i)).collect();
    assert_eq!(first_bytes, second_bytes);

    let original: HashSet<Vec<u8>> = words.iter().map(|w| w.to_vec()).collect();
    let shuffled_set: HashSet<Vec<u8>> = first_bytes.into_iter().collect();
    assert_eq!(original, shuffled_set);
}

#[test]
fn sample_with_replacement_can_exceed_collection_length() {
    let words: Vec<&[u8]> = vec![b"x", b"y"];
    let collection = from_sequence_copy(words.iter().copied());

    let drawn = sample(&collection, 10, Some(1)).unwrap();
    assert_eq!(drawn.count(), 10);
    for i in 0..drawn.count() {
        let b = bytes_at(&drawn, i);
        assert!(b == b"x" || b == b"y");
    }

    let empty = from_sequence_copy(Vec::<&[u8]>::new().into_iter());
    assert!(sample(&empty, 1, None).is_err());
    assert!(sample(&empty, 0, None).is_ok());
}
