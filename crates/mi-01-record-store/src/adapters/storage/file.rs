use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::memory::scan_prefix;

/// Largest key or value accepted in a log frame.
const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// File-backed key-value store.
///
/// Entries are never updated or removed, so the file is an append-only log
/// of frames:
///
/// ```text
/// [key_len: u32 LE][key][value_len: u32 LE][value] ...
/// ```
///
/// Each insert appends one frame and fsyncs before the entry becomes
/// visible. A failed append is cut back off the file, so the log only ever
/// holds whole frames followed by at most one torn frame left by a crash.
/// The whole log is replayed into memory on open and a torn final frame is
/// discarded there.
pub struct FileBackedKVStore {
    path: PathBuf,
    state: RwLock<LogState>,
}

struct LogState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    file: Box<dyn LogFile>,
    /// Set when a failed append could not be rolled back.
    poisoned: bool,
}

/// Append target of the log.
trait LogFile: Write + Send + Sync {
    fn size(&self) -> io::Result<u64>;
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    fn sync(&mut self) -> io::Result<()>;
}

impl LogFile for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl FileBackedKVStore {
    /// Open or create the log at `path`.
    ///
    /// A truncated final frame is an append that never completed: it is
    /// dropped with a warning and the file is cut back to the last whole
    /// frame. Fails with `CorruptionError` on an out-of-range length or a
    /// key that appears twice.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        Self::open_with(path, |file| Box::new(file) as Box<dyn LogFile>)
    }

    fn open_with<P, F>(path: P, wrap: F) -> Result<Self, KVStoreError>
    where
        P: AsRef<Path>,
        F: FnOnce(File) -> Box<dyn LogFile>,
    {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let existing = if path.exists() {
            Some(std::fs::read(&path)?)
        } else {
            None
        };
        let mut file = wrap(OpenOptions::new().create(true).append(true).open(&path)?);

        let data = match existing {
            Some(bytes) => {
                let replayed = replay(&bytes)?;
                if replayed.valid_len < bytes.len() {
                    tracing::warn!(
                        path = %path.display(),
                        discarded = bytes.len() - replayed.valid_len,
                        "Discarding torn final frame of record log"
                    );
                    file.truncate(replayed.valid_len as u64)?;
                    file.sync()?;
                }
                tracing::info!(
                    path = %path.display(),
                    keys = replayed.data.len(),
                    "Loaded record log"
                );
                replayed.data
            }
            None => {
                tracing::info!(path = %path.display(), "Creating new record log");
                BTreeMap::new()
            }
        };

        Ok(Self {
            path,
            state: RwLock::new(LogState {
                data,
                file,
                poisoned: false,
            }),
        })
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.state.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().data.is_empty()
    }
}

struct Replayed {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Byte length of the whole frames read.
    valid_len: usize,
}

enum FrameRead {
    Complete {
        key: Vec<u8>,
        value: Vec<u8>,
        len: usize,
    },
    /// The buffer ends inside the frame.
    Torn,
}

fn replay(bytes: &[u8]) -> Result<Replayed, KVStoreError> {
    let mut data = BTreeMap::new();
    let mut cursor = 0usize;
    let mut frames = 0usize;

    while cursor < bytes.len() {
        match decode_frame(&bytes[cursor..], frames)? {
            FrameRead::Complete { key, value, len } => {
                if data.insert(key, value).is_some() {
                    return Err(corruption(format!("frame {frames}: duplicate key")));
                }
                cursor += len;
                frames += 1;
            }
            FrameRead::Torn => break,
        }
    }

    Ok(Replayed {
        data,
        valid_len: cursor,
    })
}

/// Decode the frame at the start of `buf`.
fn decode_frame(buf: &[u8], frame: usize) -> Result<FrameRead, KVStoreError> {
    let Some(key_len) = read_len(buf, 0) else {
        return Ok(FrameRead::Torn);
    };
    if key_len == 0 {
        return Err(corruption(format!("frame {frame}: empty key")));
    }
    if key_len > MAX_FRAME_LEN {
        return Err(corruption(format!("frame {frame}: invalid key length {key_len}")));
    }

    let key_end = 4 + key_len;
    let Some(value_len) = read_len(buf, key_end) else {
        return Ok(FrameRead::Torn);
    };
    if value_len > MAX_FRAME_LEN {
        return Err(corruption(format!(
            "frame {frame}: invalid value length {value_len}"
        )));
    }

    let end = key_end + 4 + value_len;
    if buf.len() < end {
        return Ok(FrameRead::Torn);
    }

    Ok(FrameRead::Complete {
        key: buf[4..key_end].to_vec(),
        value: buf[key_end + 4..end].to_vec(),
        len: end,
    })
}

fn read_len(buf: &[u8], at: usize) -> Option<usize> {
    let bytes: [u8; 4] = buf.get(at..at.checked_add(4)?)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes) as usize)
}

fn corruption(message: String) -> KVStoreError {
    KVStoreError::CorruptionError { message }
}

fn encode_frame(key: &[u8], value: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(8 + key.len() + value.len());
    frame.extend_from_slice(&(key.len() as u32).to_le_bytes());
    frame.extend_from_slice(key);
    frame.extend_from_slice(&(value.len() as u32).to_le_bytes());
    frame.extend_from_slice(value);
    frame
}

fn append_frame(file: &mut dyn LogFile, frame: &[u8]) -> io::Result<()> {
    file.write_all(frame)?;
    file.flush()?;
    file.sync()
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.state.read().data.get(key).cloned())
    }

    fn insert_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError> {
        if key.is_empty() || key.len() > MAX_FRAME_LEN || value.len() > MAX_FRAME_LEN {
            return Err(KVStoreError::IOError {
                message: format!(
                    "entry size out of range: key {} bytes, value {} bytes",
                    key.len(),
                    value.len()
                ),
            });
        }

        let mut guard = self.state.write();
        let state = &mut *guard;
        if state.poisoned {
            return Err(KVStoreError::IOError {
                message: format!(
                    "record log {} has an unrolled partial append; reopen the store",
                    self.path.display()
                ),
            });
        }
        if state.data.contains_key(key) {
            return Ok(false);
        }

        let committed_len = state.file.size()?;
        if let Err(err) = append_frame(&mut *state.file, &encode_frame(key, value)) {
            match state.file.truncate(committed_len) {
                Ok(()) => {
                    // A later append's fsync also persists the shorter length
                    if let Err(sync_err) = state.file.sync() {
                        tracing::warn!(error = %sync_err, "Sync after rollback failed");
                    }
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %err,
                        "Append failed, log rolled back"
                    );
                }
                Err(rollback_err) => {
                    state.poisoned = true;
                    tracing::error!(
                        path = %self.path.display(),
                        error = %err,
                        rollback_error = %rollback_err,
                        "Append failed and could not be rolled back"
                    );
                }
            }
            return Err(err.into());
        }

        state.data.insert(key.to_vec(), value.to_vec());
        Ok(true)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.state.read().data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan_prefix(&self.state.read().data, prefix))
    }
}
