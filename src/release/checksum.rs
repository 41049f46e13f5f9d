use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{BuildError, Result};

/// Lowercase hex digests of one file's full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digests {
    pub sha1: String,
    pub sha256: String,
}

/// Hash a file in fixed-size chunks; large archives are never held in memory.
pub fn file_digests(path: &Path) -> Result<Digests> {
    let file = File::open(path).map_err(|e| BuildError::io(path, e))?;
    digest_reader(file).map_err(|e| BuildError::io(path, e))
}

pub fn digest_reader(mut reader: impl Read) -> io::Result<Digests> {
    let mut sha1 = Sha1::new();
    let mut sha256 = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        sha1.update(&buf[..read]);
        sha256.update(&buf[..read]);
    }
    Ok(Digests {
        sha1: format!("{:x}", sha1.finalize()),
        sha256: format!("{:x}", sha256.finalize()),
    })
}
