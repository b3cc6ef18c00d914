//! End-to-end: the external-interface surface — Arrow C Data Interface
//! import, the version/capability probe, and writing a view to a file.

use std::ffi::{c_void, CString};

use strands::{import_copy, import_view, write_to, ArrowArray, ArrowSchema, Str};

unsafe extern "C" fn noop_schema_release(_schema: *mut ArrowSchema) {}
unsafe extern "C" fn noop_array_release(_array: *mut ArrowArray) {}

/// Builds a minimal owned capsule pair over `strings`, with an optional
/// validity bitmap (`None` means "all valid").
fn build_capsule(
    strings: &[&[u8]],
    validity: Option<Vec<u8>>,
) -> (Box<ArrowSchema>, Box<ArrowArray>, CString, Vec<u32>, Vec<u8>, Vec<u8>) {
    let format = CString::new("u").unwrap();
    let mut data = Vec::new();
    let mut offsets = vec![0u32];
    for s in strings {
        data.extend_from_slice(s);
        offsets.push(data.len() as u32);
    }
    let validity = validity.unwrap_or_default();

    let schema = Box::new(ArrowSchema {
        format: format.as_ptr(),
        name: std::ptr::null(),
        metadata: std::ptr::null(),
        flags: 0,
        n_children: 0,
        children: std::ptr::null_mut(),
        dictionary: std::ptr::null_mut(),
        release: Some(noop_schema_release),
        private_data: std::ptr::null_mut(),
    });
    let array = Box::new(ArrowArray {
        length: strings.len() as i64,
        null_count: 0,
        offset: 0,
        n_buffers: 3,
        n_children: 0,
        buffers: Box::into_raw(Box::new([
            if validity.is_empty() { std::ptr::null() } else { validity.as_ptr() as *const c_void },
            offsets.as_ptr() as *const c_void,
            data.as_ptr() as *const c_void,
        ])) as *mut *const c_void,
        children: std::ptr::null_mut(),
        dictionary: std::ptr::null_mut(),
        release: Some(noop_array_release),
        private_data: std::ptr::null_mut(),
    });
    (schema, array, format, offsets, data, validity)
}

#[test]
fn arrow_zero_copy_import_round_trips_bytes() {
    let (mut schema, mut array, _format, _offsets, _data, _validity) = build_capsule(&[b"foo", b"bar"], None);
    let imported = unsafe { import_view(&mut *schema as *mut _, &mut *array as *mut _) }.unwrap();
    assert_eq!(imported.count(), 2);
    assert_eq!(imported.get(0).unwrap().as_slice(), b"foo");
    assert_eq!(imported.get(1).unwrap().as_slice(), b"bar");
}

#[test]
fn arrow_copy_import_collapses_nulls() {
    let (mut schema, mut array, _format, _offsets, _data, _validity) =
        build_capsule(&[b"foo", b"bar"], Some(vec![0b01]));
    let imported = unsafe { import_copy(&mut *schema as *mut _, &mut *array as *mut _) }.unwrap();
    assert_eq!(imported.get(0).unwrap().as_slice(), b"foo");
    assert_eq!(imported.get(1).unwrap().as_slice(), b"");
}

#[test]
fn version_probe_reports_a_well_formed_version() {
    let (major, minor, patch) = strands::version_number();
    assert_eq!(strands::version_string(), format!("{major}.{minor}.{patch}"));
}

#[test]
fn write_to_copies_exact_bytes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");
    let contents = Str::from_owned(b"end to end".to_vec());
    write_to(&contents, &path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"end to end");
}
