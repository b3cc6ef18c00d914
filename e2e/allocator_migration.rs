//! End-to-end: layout migration preserves content across an allocator
//! swap, and a same-allocator swap is a no-op.

use strands::{default_allocator, from_sequence_copy, same_allocator};

fn bytes_at(s: &strands::Strs, i: usize) -> Vec<u8> {
    s.get(i as i64).unwrap().as_slice().to_vec()
}

#[test]
fn migrating_to_a_new_allocator_preserves_content() {
    let words: Vec<&[u8]> = vec![b"one", b"two", b"three"];
    let collection = from_sequence_copy(words.iter().copied());

    let new_allocator = default_allocator();
    let migrated = collection.with_allocator(new_allocator).unwrap();

    assert_eq!(migrated.count(), collection.count());
    for i in 0..collection.count() {
        assert_eq!(bytes_at(&collection, i), bytes_at(&migrated, i));
    }
}

#[test]
fn migrating_to_the_same_allocator_instance_is_a_no_op() {
    let words: Vec<&[u8]> = vec![b"a", b"b"];
    let collection = from_sequence_copy(words.iter().copied());
    let allocator = default_allocator();
    let once = collection.with_allocator(allocator.clone()).unwrap();
    let twice = once.with_allocator(allocator.clone()).unwrap();

    assert_eq!(twice.count(), 2);
    assert_eq!(bytes_at(&twice, 0), b"a");
    assert!(same_allocator(&allocator, &allocator));
}
