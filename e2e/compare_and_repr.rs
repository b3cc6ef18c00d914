//! End-to-end: elementwise ordering against an external iterable, and the
//! bounded-vs-unbounded display forms.

use std::cmp::Ordering;

use strands::{compare_with_iter, from_sequence_copy};

#[test]
fn compare_with_iter_is_elementwise_lexicographic() {
    let words: Vec<&[u8]> = vec![b"apple", b"banana"];
    let collection = from_sequence_copy(words.iter().copied());

    let equal: Vec<&[u8]> = vec![b"apple", b"banana"];
    assert_eq!(compare_with_iter(&collection, equal.into_iter()), Ordering::Equal);

    let shorter: Vec<&[u8]> = vec![b"apple"];
    assert_eq!(compare_with_iter(&collection, shorter.into_iter()), Ordering::Greater);

    let different: Vec<&[u8]> = vec![b"apple", b"cherry"];
    assert_eq!(compare_with_iter(&collection, different.into_iter()), Ordering::Less);
}

#[test]
fn collections_order_the_same_way_as_their_elements() {
    let a = from_sequence_copy(vec![b"a".as_slice(), b"b".as_slice()].into_iter());
    let b = from_sequence_copy(vec![b"a".as_slice(), b"c".as_slice()].into_iter());
    assert!(a < b);
}

#[test]
fn debug_is_bounded_and_display_is_not() {
    let long_word = vec![b'x'; 2000];
    let collection = from_sequence_copy(vec![long_word.as_slice(), b"tail"].into_iter());

    let debug_repr = format!("{collection:?}");
    assert!(debug_repr.starts_with("Strs("));
    assert!(debug_repr.contains("more"));
    assert!(!debug_repr.contains("tail"));

    let display_repr = format!("{collection}");
    assert!(!display_repr.starts_with("Strs("));
    assert!(display_repr.contains("tail"));
}
