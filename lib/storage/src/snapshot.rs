// Snapshot persistence for the candidate index
use anyhow::{anyhow, bail, Context, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use specmatch_core::{CandidateIndex, IndexSnapshot};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Version of the on-disk snapshot layout
pub const FORMAT_VERSION: u32 = 1;

/// Snapshot description for callers and logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDescription {
    pub path: PathBuf,
    pub created_at: String,
    pub items: usize,
    pub dimension: usize,
    pub size: u64,
    pub checksum: String,
}

/// What actually lands on disk (gzip-compressed bincode).
///
/// The payload is the JSON-encoded [`IndexSnapshot`]; the checksum is the
/// SHA-256 of the payload bytes.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    format_version: u32,
    created_at: String,
    checksum: String,
    payload: Vec<u8>,
}

/// A single index snapshot file
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persist a built index, replacing any previous snapshot atomically
    pub fn save(&self, index: &CandidateIndex) -> Result<SnapshotDescription> {
        let snapshot = index.snapshot().context("index cannot be snapshotted")?;
        let items = snapshot.items.len();
        let dimension = snapshot.embedder.dimension;

        let payload = serde_json::to_vec(&snapshot)?;
        let envelope = SnapshotEnvelope {
            format_version: FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339(),
            checksum: checksum(&payload),
            payload,
        };
        let data = bincode::serialize(&envelope)
            .map_err(|e| anyhow!("Serialization error: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        AtomicFile::new(&self.path, AllowOverwrite)
            .write(|file| {
                let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
                encoder.write_all(&data)?;
                encoder.finish()?.flush()
            })
            .map_err(|e| anyhow!("failed to write snapshot {}: {}", self.path.display(), e))?;

        let size = fs::metadata(&self.path)?.len();
        tracing::info!(
            path = %self.path.display(),
            items,
            size,
            "index snapshot saved"
        );

        Ok(SnapshotDescription {
            path: self.path.clone(),
            created_at: envelope.created_at,
            items,
            dimension,
            size,
            checksum: envelope.checksum,
        })
    }

    /// Restore the index from disk.
    ///
    /// `Ok(None)` when there is no snapshot yet (cold start). A snapshot that
    /// exists but cannot be trusted is an error.
    pub fn load(&self) -> Result<Option<CandidateIndex>> {
        let Some(envelope) = self.read_envelope()? else {
            tracing::info!(path = %self.path.display(), "no index snapshot found");
            return Ok(None);
        };

        let snapshot: IndexSnapshot = serde_json::from_slice(&envelope.payload)
            .with_context(|| format!("malformed snapshot payload in {}", self.path.display()))?;
        let index = CandidateIndex::from_snapshot(snapshot)
            .with_context(|| format!("inconsistent snapshot {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            items = index.count(),
            created_at = %envelope.created_at,
            "index snapshot loaded"
        );
        Ok(Some(index))
    }

    /// Describe the snapshot on disk without rebuilding the index
    pub fn describe(&self) -> Result<Option<SnapshotDescription>> {
        let Some(envelope) = self.read_envelope()? else {
            return Ok(None);
        };
        let snapshot: IndexSnapshot = serde_json::from_slice(&envelope.payload)?;

        Ok(Some(SnapshotDescription {
            path: self.path.clone(),
            created_at: envelope.created_at,
            items: snapshot.items.len(),
            dimension: snapshot.embedder.dimension,
            size: fs::metadata(&self.path)?.len(),
            checksum: envelope.checksum,
        }))
    }

    /// Read, decompress and verify the envelope
    fn read_envelope(&self) -> Result<Option<SnapshotEnvelope>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut decoder = GzDecoder::new(BufReader::new(file));
        let mut data = Vec::new();
        decoder
            .read_to_end(&mut data)
            .with_context(|| format!("snapshot {} is not a valid archive", self.path.display()))?;

        let envelope: SnapshotEnvelope = bincode::deserialize(&data)
            .map_err(|e| anyhow!("Deserialization error: {}", e))?;

        if envelope.format_version != FORMAT_VERSION {
            bail!(
                "Unsupported snapshot format version {} (expected {})",
                envelope.format_version,
                FORMAT_VERSION
            );
        }

        let actual = checksum(&envelope.payload);
        if actual != envelope.checksum {
            bail!(
                "Checksum mismatch: expected {}, got {}",
                envelope.checksum,
                actual
            );
        }

        Ok(Some(envelope))
    }
}

fn checksum(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
