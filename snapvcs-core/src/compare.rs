use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8 * 1024;

/// Returns true when both paths are regular files with byte-identical contents.
///
/// A missing or unreadable file is never identical to anything; this never
/// returns an error.
pub fn files_identical(a: &Path, b: &Path) -> bool {
    let (meta_a, meta_b) = match (a.metadata(), b.metadata()) {
        (Ok(ma), Ok(mb)) => (ma, mb),
        _ => return false,
    };

    if !meta_a.is_file() || !meta_b.is_file() {
        return false;
    }

    if meta_a.len() != meta_b.len() {
        return false;
    }

    contents_equal(a, b).unwrap_or(false)
}

fn contents_equal(a: &Path, b: &Path) -> std::io::Result<bool> {
    let mut reader_a = BufReader::new(File::open(a)?);
    let mut reader_b = BufReader::new(File::open(b)?);
    let mut buf_a = vec![0u8; CHUNK_SIZE];
    let mut buf_b = vec![0u8; CHUNK_SIZE];

    loop {
        let n = read_full(&mut reader_a, &mut buf_a)?;
        let m = read_full(&mut reader_b, &mut buf_b)?;

        if n != m || buf_a[..n] != buf_b[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

// Fills `buf` unless EOF is reached first, so chunk boundaries line up.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identical_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"same content").unwrap();
        fs::write(&b, b"same content").unwrap();

        assert!(files_identical(&a, &b));
    }

    #[test]
    fn test_same_size_different_content() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"v1").unwrap();
        fs::write(&b, b"v2").unwrap();

        assert!(!files_identical(&a, &b));
    }

    #[test]
    fn test_different_size() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"short").unwrap();
        fs::write(&b, b"much longer").unwrap();

        assert!(!files_identical(&a, &b));
    }

    #[test]
    fn test_large_files_differing_in_last_byte() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let mut data = vec![7u8; CHUNK_SIZE * 3 + 17];
        fs::write(&a, &data).unwrap();
        *data.last_mut().unwrap() = 8;
        fs::write(&b, &data).unwrap();

        assert!(!files_identical(&a, &b));
        assert!(files_identical(&a, &a));
    }

    #[test]
    fn test_missing_file_is_not_identical() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        fs::write(&a, b"x").unwrap();

        assert!(!files_identical(&a, &dir.path().join("missing")));
        assert!(!files_identical(&dir.path().join("missing"), &a));
    }

    #[test]
    fn test_directory_is_not_identical() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("d1")).unwrap();
        fs::create_dir(dir.path().join("d2")).unwrap();

        assert!(!files_identical(&dir.path().join("d1"), &dir.path().join("d2")));
    }

    #[test]
    fn test_empty_files_are_identical() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, b"").unwrap();
        fs::write(&b, b"").unwrap();

        assert!(files_identical(&a, &b));
    }
}
