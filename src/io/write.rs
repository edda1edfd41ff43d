use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

/// Write-then-rename wrapper so a failed run never leaves half-written outputs.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

/// Open a temp file next to `target`. Refuses to clobber an existing file
/// unless `force` is set.
pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    let parent = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("[io::write] Failed to create dir {}", parent.display()))?;

    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }

    let tmp = NamedTempFile::new_in(parent).context("[io::write] Failed to create temp file")?;
    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl PendingWrite {
    #[inline] pub fn target(&self) -> &Path { &self.target }

    /// Flush, then atomically move the temp file onto the target.
    pub fn finish(mut self) -> Result<()> {
        self.tmp.flush()?;
        self.tmp.as_file().sync_all().ok(); // best-effort fsync
        self.tmp.persist(&self.target)
            .with_context(|| format!("[io::write] Failed to rename to {}", self.target.display()))?;
        if let Some(dir) = self.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

/// Write a whole buffer to `target` through a temp file.
pub fn write_atomic(target: &Path, bytes: &[u8], force: bool) -> Result<()> {
    let mut pending = open_for_write(target, force)?;
    pending.write_all(bytes)
        .with_context(|| format!("[io::write] Failed to write {}", target.display()))?;
    pending.finish()
}
