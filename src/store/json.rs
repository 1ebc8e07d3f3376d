use crate::error::{PipelineError, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse a UTF-8 JSON document
pub fn read_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(PipelineError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON with a trailing newline
pub fn to_json_bytes<T: Serialize>(value: &T, what: &'static str) -> Result<Vec<u8>> {
    let mut body = serde_json::to_vec_pretty(value)
        .map_err(|source| PipelineError::Encode { what, source })?;
    body.push(b'\n');
    Ok(body)
}

/// Serialize fully in memory, then write once (creates parent dirs)
pub fn write_json<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    write_bytes(path, &to_json_bytes(value, what)?)
}

/// Sibling `<name>.tmp` used while staging a batch
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}

/// Stage every output next to its target, then rename them into place.
/// Nothing is renamed unless every buffer was staged.
pub fn write_all(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        let tmp = staging_path(path);
        if let Err(e) = write_bytes(&tmp, bytes) {
            discard(&staged);
            return Err(e);
        }
        staged.push((tmp, *path));
    }

    for (idx, (tmp, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(tmp, path) {
            discard(&staged[idx..]);
            return Err(PipelineError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    Ok(())
}

/// Write an already-rendered buffer in one call (creates parent dirs)
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, bytes).map_err(write_err)?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
