//! Apache Arrow C Data Interface adapter (§6).
//!
//! `ArrowSchema`/`ArrowArray` mirror the real C Data Interface layout byte
//! for byte — that shape is fixed by an external standard, not a design
//! choice here. Everything about the *contents* (format string, buffer
//! count, buffer triple) is validated before any memory is touched; a
//! malformed capsule returns a typed `Error` rather than trusting the
//! producer.

use std::ffi::{c_void, CStr};
use std::fmt;
use std::os::raw::c_char;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::strs::{ColumnarParent, Strs};

/// Mirrors `struct ArrowSchema` from the Arrow C Data Interface.
#[repr(C)]
pub struct ArrowSchema {
    pub format: *const c_char,
    pub name: *const c_char,
    pub metadata: *const c_char,
    pub flags: i64,
    pub n_children: i64,
    pub children: *mut *mut ArrowSchema,
    pub dictionary: *mut ArrowSchema,
    pub release: Option<unsafe extern "C" fn(*mut ArrowSchema)>,
    pub private_data: *mut c_void,
}

/// Mirrors `struct ArrowArray` from the Arrow C Data Interface.
#[repr(C)]
pub struct ArrowArray {
    pub length: i64,
    pub null_count: i64,
    pub offset: i64,
    pub n_buffers: i64,
    pub n_children: i64,
    pub buffers: *mut *const c_void,
    pub children: *mut *mut ArrowArray,
    pub dictionary: *mut ArrowArray,
    pub release: Option<unsafe extern "C" fn(*mut ArrowArray)>,
    pub private_data: *mut c_void,
}

#[derive(Clone, Copy)]
enum OffsetWidth {
    W32,
    W64,
}

fn offset_width_from_format(format: &str) -> Result<OffsetWidth> {
    match format {
        "u" | "z" => Ok(OffsetWidth::W32),
        "U" | "Z" => Ok(OffsetWidth::W64),
        other => Err(Error::TypeMismatch(format!("unsupported arrow format string {other:?}"))),
    }
}

/// Validated fields pulled out of a capsule pair before any slice is built.
struct Parsed {
    count: usize,
    width: OffsetWidth,
    validity_ptr: *const u8,
    offsets_ptr: *const u8,
    data_ptr: *const u8,
    data_len: usize,
}

/// # Safety
/// `schema` and `array` must point to live, correctly-initialized Arrow C
/// Data Interface capsules that the caller has not yet released.
unsafe fn parse_capsule(schema: *mut ArrowSchema, array: *mut ArrowArray) -> Result<Parsed> {
    if schema.is_null() || array.is_null() {
        return Err(Error::TypeMismatch("null arrow capsule".to_string()));
    }
    let format_ptr = (*schema).format;
    if format_ptr.is_null() {
        return Err(Error::TypeMismatch("arrow schema missing format string".to_string()));
    }
    let format = CStr::from_ptr(format_ptr)
        .to_str()
        .map_err(|_| Error::TypeMismatch("arrow format string is not valid UTF-8".to_string()))?;
    let width = offset_width_from_format(format)?;

    if (*array).n_buffers != 3 {
        return Err(Error::TypeMismatch(format!(
            "expected 3 arrow buffers (validity, offsets, data), got {}",
            (*array).n_buffers
        )));
    }
    let buffers = (*array).buffers;
    if buffers.is_null() {
        return Err(Error::TypeMismatch("arrow array missing buffers".to_string()));
    }
    let count = (*array).length as usize;
    let validity_ptr = *buffers.add(0) as *const u8;
    let offsets_ptr = *buffers.add(1) as *const u8;
    let data_ptr = *buffers.add(2) as *const u8;
    if offsets_ptr.is_null() {
        return Err(Error::TypeMismatch("arrow array missing offsets buffer".to_string()));
    }

    let data_len = if count == 0 {
        0
    } else {
        match width {
            OffsetWidth::W32 => *(offsets_ptr as *const u32).add(count) as usize,
            OffsetWidth::W64 => *(offsets_ptr as *const u64).add(count) as usize,
        }
    };

    Ok(Parsed { count, width, validity_ptr, offsets_ptr, data_ptr, data_len })
}

#[inline]
unsafe fn is_valid(validity_ptr: *const u8, i: usize) -> bool {
    validity_ptr.is_null() || (*validity_ptr.add(i / 8) >> (i % 8)) & 1 != 0
}

/// A parent that keeps a zero-copy Arrow capsule pair alive, releasing both
/// the array and schema producer callbacks on drop.
struct ArrowCapsule {
    array: *mut ArrowArray,
    schema: *mut ArrowSchema,
    data_ptr: *const u8,
    data_len: usize,
    offsets_ptr: *const u8,
    offsets_count: usize,
    width: OffsetWidth,
}

// SAFETY: the capsule is only ever read through `ColumnarParent`, never
// mutated, and the Arrow C Data Interface contract guarantees the producer
// will not free the buffers until `release` is invoked (which only happens
// in this type's `Drop`).
unsafe impl Send for ArrowCapsule {}
unsafe impl Sync for ArrowCapsule {}

impl fmt::Debug for ArrowCapsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrowCapsule").field("data_len", &self.data_len).finish()
    }
}

impl ColumnarParent for ArrowCapsule {
    fn data(&self) -> &[u8] {
        if self.data_len == 0 {
            return &[];
        }
        // SAFETY: `data_len` was derived from the capsule's own offsets
        // buffer at parse time and the capsule is still alive (not dropped).
        unsafe { std::slice::from_raw_parts(self.data_ptr, self.data_len) }
    }

    fn offsets32(&self) -> Option<&[u32]> {
        match self.width {
            OffsetWidth::W32 => {
                // SAFETY: see `data()`.
                Some(unsafe { std::slice::from_raw_parts(self.offsets_ptr as *const u32, self.offsets_count) })
            }
            OffsetWidth::W64 => None,
        }
    }

    fn offsets64(&self) -> Option<&[u64]> {
        match self.width {
            OffsetWidth::W64 => {
                // SAFETY: see `data()`.
                Some(unsafe { std::slice::from_raw_parts(self.offsets_ptr as *const u64, self.offsets_count) })
            }
            OffsetWidth::W32 => None,
        }
    }
}

impl Drop for ArrowCapsule {
    fn drop(&mut self) {
        // SAFETY: each release callback is only ever invoked once, here.
        unsafe {
            if let Some(release) = (*self.array).release {
                release(self.array);
            }
            if let Some(release) = (*self.schema).release {
                release(self.schema);
            }
        }
    }
}

/// Imports a capsule pair as a zero-copy view: the returned `Strs` keeps the
/// capsule's buffers alive (and releases them on drop) instead of copying.
/// Null entries are not collapsed in this path; a null-aware consumer should
/// read the schema's validity buffer itself, or use [`import_copy`].
///
/// # Safety
/// `schema` and `array` must point to live Arrow C Data Interface capsules
/// that the caller has not already released, and ownership of both capsules
/// transfers to the returned `Strs` (its `release` will be called when the
/// last reference to it is dropped).
pub unsafe fn import_view(schema: *mut ArrowSchema, array: *mut ArrowArray) -> Result<Strs> {
    let parsed = parse_capsule(schema, array)?;
    let capsule = ArrowCapsule {
        array,
        schema,
        data_ptr: parsed.data_ptr,
        data_len: parsed.data_len,
        offsets_ptr: parsed.offsets_ptr,
        offsets_count: parsed.count + 1,
        width: parsed.width,
    };
    let parent: Arc<dyn ColumnarParent> = Arc::new(capsule);
    Ok(match parsed.width {
        OffsetWidth::W32 => Strs::U32TapeView { parent },
        OffsetWidth::W64 => Strs::U64TapeView { parent },
    })
}

/// Imports a capsule pair by copying its contents into an owned tape,
/// releasing the capsule before returning. Null entries collapse to
/// zero-length strings, per §6.
///
/// # Safety
/// Same preconditions as [`import_view`], except ownership of the capsules
/// does not transfer — both are released inside this call.
pub unsafe fn import_copy(schema: *mut ArrowSchema, array: *mut ArrowArray) -> Result<Strs> {
    let parsed = parse_capsule(schema, array)?;
    let mut data = Vec::new();
    let mut offsets: Vec<u64> = Vec::with_capacity(parsed.count + 1);
    offsets.push(0);
    let mut running = 0u64;
    for i in 0..parsed.count {
        let (start, end) = match parsed.width {
            OffsetWidth::W32 => {
                let offs = std::slice::from_raw_parts(parsed.offsets_ptr as *const u32, parsed.count + 1);
                (offs[i] as usize, offs[i + 1] as usize)
            }
            OffsetWidth::W64 => {
                let offs = std::slice::from_raw_parts(parsed.offsets_ptr as *const u64, parsed.count + 1);
                (offs[i] as usize, offs[i + 1] as usize)
            }
        };
        if is_valid(parsed.validity_ptr, i) {
            let src = std::slice::from_raw_parts(parsed.data_ptr.add(start), end - start);
            data.extend_from_slice(src);
            running += (end - start) as u64;
        }
        offsets.push(running);
    }

    if let Some(release) = (*array).release {
        release(array);
    }
    if let Some(release) = (*schema).release {
        release(schema);
    }

    let allocator = crate::alloc::default_allocator();
    if running < crate::config::OFFSET_WIDTH_PROMOTION_THRESHOLD {
        let offsets32: Vec<u32> = offsets.iter().map(|&o| o as u32).collect();
        Ok(Strs::U32TapeOwned {
            tape: Arc::new(crate::strs::OwnedTape32 { data, offsets: offsets32 }),
            allocator,
        })
    } else {
        Ok(Strs::U64TapeOwned { tape: Arc::new(crate::strs::OwnedTape64 { data, offsets }), allocator })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    /// A minimal owned capsule pair for tests: leaks its `CString` and
    /// buffers into raw pointers, with a `release` that drops them via
    /// `Box::from_raw` so the capsule's private_data round-trips safely.
    struct OwnedCapsule {
        format: CString,
        validity: Vec<u8>,
        offsets: Vec<u32>,
        data: Vec<u8>,
    }

    unsafe extern "C" fn noop_schema_release(_schema: *mut ArrowSchema) {}
    unsafe extern "C" fn noop_array_release(_array: *mut ArrowArray) {}

    fn build(strings: &[&[u8]], format: &str) -> (Box<ArrowSchema>, Box<ArrowArray>, OwnedCapsule) {
        let mut data = Vec::new();
        let mut offsets = vec![0u32];
        for s in strings {
            data.extend_from_slice(s);
            offsets.push(data.len() as u32);
        }
        let capsule = OwnedCapsule { format: CString::new(format).unwrap(), validity: Vec::new(), offsets, data };
        let schema = Box::new(ArrowSchema {
            format: capsule.format.as_ptr(),
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
                if capsule.validity.is_empty() { std::ptr::null() } else { capsule.validity.as_ptr() as *const c_void },
                capsule.offsets.as_ptr() as *const c_void,
                capsule.data.as_ptr() as *const c_void,
            ])) as *mut *const c_void,
            children: std::ptr::null_mut(),
            dictionary: std::ptr::null_mut(),
            release: Some(noop_array_release),
            private_data: std::ptr::null_mut(),
        });
        (schema, array, capsule)
    }

    #[test]
    fn import_view_reads_u32_capsule() {
        let (mut schema, mut array, _capsule) = build(&[b"foo", b"bar"], "u");
        let strs = unsafe { import_view(&mut *schema as *mut _, &mut *array as *mut _) }.unwrap();
        assert_eq!(strs.count(), 2);
        assert_eq!(strs.bytes_at(0), b"foo");
        assert_eq!(strs.bytes_at(1), b"bar");
    }

    #[test]
    fn import_copy_collapses_null_entries_to_empty_strings() {
        let mut data = Vec::new();
        let mut offsets = vec![0u32];
        for s in [b"foo".as_slice(), b"bar".as_slice()] {
            data.extend_from_slice(s);
            offsets.push(data.len() as u32);
        }
        let capsule =
            OwnedCapsule { format: CString::new("u").unwrap(), validity: vec![0b01], offsets, data };
        let mut schema = Box::new(ArrowSchema {
            format: capsule.format.as_ptr(),
            name: std::ptr::null(),
            metadata: std::ptr::null(),
            flags: 0,
            n_children: 0,
            children: std::ptr::null_mut(),
            dictionary: std::ptr::null_mut(),
            release: Some(noop_schema_release),
            private_data: std::ptr::null_mut(),
        });
        let mut array = Box::new(ArrowArray {
            length: 2,
            null_count: 1,
            offset: 0,
            n_buffers: 3,
            n_children: 0,
            buffers: Box::into_raw(Box::new([
                capsule.validity.as_ptr() as *const c_void,
                capsule.offsets.as_ptr() as *const c_void,
                capsule.data.as_ptr() as *const c_void,
            ])) as *mut *const c_void,
            children: std::ptr::null_mut(),
            dictionary: std::ptr::null_mut(),
            release: Some(noop_array_release),
            private_data: std::ptr::null_mut(),
        });
        let strs = unsafe { import_copy(&mut *schema as *mut _, &mut *array as *mut _) }.unwrap();
        assert_eq!(strs.count(), 2);
        assert_eq!(strs.bytes_at(0), b"foo");
        assert_eq!(strs.bytes_at(1), b"");
    }

    #[test]
    fn rejects_unknown_format() {
        let (mut schema, mut array, _capsule) = build(&[b"foo"], "q");
        let result = unsafe { import_view(&mut *schema as *mut _, &mut *array as *mut _) };
        assert!(result.is_err());
    }

    #[test]
    fn rejects_wrong_buffer_count() {
        let (mut schema, mut array, _capsule) = build(&[b"foo"], "u");
        array.n_buffers = 2;
        let result = unsafe { import_view(&mut *schema as *mut _, &mut *array as *mut _) };
        assert!(result.is_err());
    }
}
