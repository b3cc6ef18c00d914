//! End-to-end: build a collection from a sequence, subscript it, and run
//! the byte-level search/translate operations a consumer would reach for
//! first.

use strands::{from_sequence_copy, Str};

#[test]
fn construct_subscript_and_search_round_trip() {
    let words: Vec<&[u8]> = vec![b"apple", b"banana", b"cherry"];
    let collection = from_sequence_copy(words.iter().copied());

    assert_eq!(collection.count(), 3);
    assert_eq!(collection.get(0).unwrap().as_slice(), b"apple");
    assert_eq!(collection.get(-1).unwrap().as_slice(), b"cherry");
    assert!(collection.contains(b"banana"));
    assert!(!collection.contains(b"grape"));

    let middle = collection.slice(Some(1), Some(3), 1).unwrap();
    assert_eq!(middle.count(), 2);
    assert_eq!(middle.get(0).unwrap().as_slice(), b"banana");
}

#[test]
fn translate_and_find_scenarios_from_the_contract() {
    let mut table = [0u8; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = i as u8;
    }
    table[b'A' as usize] = b'a';
    table[b'b' as usize] = b'B';
    table[b'C' as usize] = b'c';

    let text = Str::from_owned(b"AbC".to_vec());
    assert_eq!(text.translate(&table).as_slice(), b"aBc");

    let repeated = Str::from_owned(b"aaabc".to_vec());
    assert_eq!(repeated.find_first_not_of(&strands::ByteSet::from_bytes(b"a")), Some(3));

    let hello = Str::from_owned(b"hello".to_vec());
    assert_eq!(hello.find_last_of(&strands::ByteSet::from_bytes(b"lo")), Some(4));
}

#[test]
fn hash_is_deterministic_for_equal_seeds() {
    let a = Str::from_owned(b"same bytes".to_vec());
    let b = Str::from_owned(b"same bytes".to_vec());
    assert_eq!(a.hash(7), b.hash(7));
    assert_ne!(a.hash(7), a.hash(8));
}
