//! Write-to-file external interface (§6). A single buffered write rather
//! than a streaming/chunked format, since the contract is "copy these bytes
//! to a new file", not an incremental transfer.

use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::view::Str;

/// Creates (or truncates) the file at `path` and writes `contents`'s bytes
/// to it in one call. No temp-file/rename semantics: a failure partway
/// through leaves whatever was written so far.
pub fn write_to(contents: &Str, path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_slice())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let contents = Str::from_owned(b"hello, file".to_vec());
        write_to(&contents, &path).unwrap();
        let read_back = std::fs::read(&path).unwrap();
        assert_eq!(read_back, b"hello, file");
    }

    #[test]
    fn fails_for_an_unwritable_path() {
        let contents = Str::from_owned(b"x".to_vec());
        let result = write_to(&contents, "/nonexistent-dir-xyz/out.txt");
        assert!(result.is_err());
    }
}
