//! End-to-end: the split/rsplit/splitlines scenarios, including a full
//! split-then-join round trip through the public API.

use strands::Str;

fn parts(s: &strands::Strs) -> Vec<Vec<u8>> {
    (0..s.count()).map(|i| s.get(i as i64).unwrap().as_slice().to_vec()).collect()
}

#[test]
fn split_scenario_with_keepseparator_and_maxsplit() {
    let haystack = Str::from_owned(b"a,b,,c".to_vec());
    let sep = Str::from_owned(b",".to_vec());

    let plain = haystack.split(&sep, false, None).unwrap();
    assert_eq!(parts(&plain), vec![b"a".to_vec(), b"b".to_vec(), b"".to_vec(), b"c".to_vec()]);

    let kept = haystack.split(&sep, true, None).unwrap();
    assert_eq!(parts(&kept), vec![b"a,".to_vec(), b"b,".to_vec(), b",".to_vec(), b"c".to_vec()]);

    let capped = haystack.split(&sep, false, Some(2)).unwrap();
    assert_eq!(parts(&capped), vec![b"a".to_vec(), b"b".to_vec(), b",c".to_vec()]);
}

#[test]
fn rsplit_scenario_matches_the_contract() {
    let haystack = Str::from_owned(b"a,b,,c".to_vec());
    let sep = Str::from_owned(b",".to_vec());
    let got = haystack.rsplit(&sep, false, Some(2)).unwrap();
    assert_eq!(parts(&got), vec![b"a,b".to_vec(), b"".to_vec(), b"c".to_vec()]);
}

#[test]
fn splitlines_splits_cr_and_lf_independently() {
    let haystack = Str::from_owned(b"x\ny\r\nz".to_vec());
    let got = haystack.splitlines(false);
    assert_eq!(parts(&got), vec![b"x".to_vec(), b"y".to_vec(), b"".to_vec(), b"z".to_vec()]);
}

#[test]
fn split_then_join_reconstructs_the_haystack() {
    let original = b"the,quick,,fox".to_vec();
    let haystack = Str::from_owned(original.clone());
    let sep = Str::from_owned(b",".to_vec());
    let pieces = haystack.split(&sep, false, None).unwrap();

    let mut rebuilt = Vec::new();
    for (i, piece) in parts(&pieces).into_iter().enumerate() {
        if i > 0 {
            rebuilt.extend_from_slice(b",");
        }
        rebuilt.extend_from_slice(&piece);
    }
    assert_eq!(rebuilt, original);
}
