//! Loading email text from disk
//!
//! The scoring core never touches the filesystem; callers read the message
//! here first. Failures come back as errors, never as a verdict.

use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, SpamError};

/// Read a whole file as UTF-8 text
pub fn load_email<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!("Loaded {} bytes from {}", content.len(), path.display());
            Ok(content)
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            Err(match e.kind() {
                ErrorKind::NotFound => SpamError::FileNotFound(path.to_path_buf()),
                ErrorKind::InvalidData => SpamError::Decode {
                    path: path.to_path_buf(),
                    source: e,
                },
                _ => SpamError::Io(e),
            })
        }
    }
}

/// Read all of stdin as UTF-8 text
pub fn load_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::Read::read_to_string(&mut std::io::stdin(), &mut content).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            SpamError::Decode {
                path: "<stdin>".into(),
                source: e,
            }
        } else {
            SpamError::Io(e)
        }
    })?;
    Ok(content)
}
