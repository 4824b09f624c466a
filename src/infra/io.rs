use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Outcome of a single idempotent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Unchanged,
    Create,
    Update,
}

impl WriteAction {
    /// True when the file was (or in preview mode, would be) written.
    pub fn is_write(self) -> bool {
        !matches!(self, WriteAction::Unchanged)
    }
}

impl std::fmt::Display for WriteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteAction::Unchanged => write!(f, "unchanged"),
            WriteAction::Create => write!(f, "create"),
            WriteAction::Update => write!(f, "update"),
        }
    }
}

/// Read a file's raw bytes. Files above 1 MiB are memory-mapped.
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.len() > MMAP_THRESHOLD {
        let file =
            File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;

        // Safety: read-only map, copied out before the handle drops
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map {}", path.display()))?;

        Ok(mmap.to_vec())
    } else {
        fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))
    }
}

/// Decode bytes as text, replacing invalid UTF-8 sequences instead of failing.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a file as text via [`decode_lossy`].
pub fn read_text_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
    read_bytes(path).map(|bytes| decode_lossy(&bytes))
}

/// Write `content` to `path` only when its bytes differ from what is on disk.
///
/// In preview mode nothing is written; the returned action describes what
/// would have happened. This is the only write path for generated artifacts.
pub fn write_if_changed<C: AsRef<[u8]>>(path: &Path, content: C, dry_run: bool) -> Result<WriteAction> {
    let content = content.as_ref();
    let existed = path.is_file();

    if existed && read_bytes(path)? == content {
        debug!(path = %path.display(), "unchanged");
        return Ok(WriteAction::Unchanged);
    }

    let action = if existed {
        WriteAction::Update
    } else {
        WriteAction::Create
    };

    if dry_run {
        debug!(path = %path.display(), %action, "dry-run");
        return Ok(action);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), %action, "written");
    Ok(action)
}
