//! JSON rendering of conversion artifacts

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::witness::PublicWitness;

#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Anything that can be written out. A witness is reduced to its public
/// vector; every other value is rendered structurally.
#[derive(Clone, Debug)]
pub enum Artifact {
    Value(Value),
    PublicWitness(PublicWitness),
}

impl Artifact {
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Value(serde_json::to_value(value)?))
    }

    fn to_value(&self) -> Result<Value> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::PublicWitness(witness) => Ok(Value::from(witness.public_vector()?)),
        }
    }
}

impl From<PublicWitness> for Artifact {
    fn from(witness: PublicWitness) -> Self {
        Self::PublicWitness(witness)
    }
}

impl From<Value> for Artifact {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Two-space indented JSON, no trailing newline.
pub fn render_json(artifact: &Artifact) -> Result<String> {
    let value = artifact.to_value()?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Renders `artifact` and writes it to `path`. The document is written to a
/// sibling file first and renamed into place, so `path` is either fully
/// replaced or left as it was.
pub fn save_to_json(path: &Path, artifact: &Artifact) -> Result<()> {
    let rendered = render_json(artifact)?;
    write_atomic(path, rendered.as_bytes())?;
    info!(path = %path.display(), bytes = rendered.len(), "wrote json");
    Ok(())
}

/// Shorthand for `save_to_json(path, &Artifact::from_serialize(value)?)`.
pub fn save_value<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    save_to_json(path, &Artifact::from_serialize(value)?)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = temp_path_for(path);

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_MODE);
    }
    let mut file = options.open(&tmp_path)?;
    // only a file this call created is ever cleaned up
    let guard = TempFileGuard::new(tmp_path.clone());
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    #[cfg(unix)]
    {
        // mode() on open is subject to the umask
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(OUTPUT_MODE))?;
    }

    fs::rename(&tmp_path, path)?;
    guard.disarm();
    Ok(())
}

/// `<name>.tmp.<pid>.<nanos>.<seq>`, distinct for every call in the process.
fn temp_path_for(path: &Path) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);

    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".tmp.{}.{nanos}.{seq}", std::process::id()));
    path.with_file_name(name)
}

struct TempFileGuard {
    path: Option<PathBuf>,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn disarm(mut self) {
        self.path = None;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            let _ = fs::remove_file(path);
        }
    }
}
