//! Saved-cart persistence.
//!
//! Selections and blockouts only make sense against the dataset they were
//! made from: section ids and term labels are dataset-specific. The store
//! therefore stamps every saved cart with a fingerprint of the records it
//! was built against, and silently discards carts whose fingerprint no
//! longer matches on load. A stale or corrupt cart is an empty cart, not
//! an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::catalog::SessionRecord;
use crate::models::{Blockout, Selection};

/// Storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing, or removing the cart file failed.
    #[error("cart storage I/O: {0}")]
    Io(#[from] io::Error),
    /// Encoding the cart (or the dataset fingerprint input) failed.
    #[error("cart serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// SHA-256 hex digest of the records' canonical JSON.
///
/// Field order is fixed by the struct definition, so two equal datasets
/// always hash equally, and any edit to any row changes the digest.
pub fn dataset_fingerprint(records: &[SessionRecord]) -> Result<String, StorageError> {
    let json = serde_json::to_string(records)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// One persisted cart: the owner's selections and blockouts, stamped with
/// the dataset fingerprint they were made against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCart {
    /// Fingerprint of the dataset the cart belongs to.
    pub fingerprint: String,
    /// Saved course selections.
    pub selections: Vec<Selection>,
    /// Saved blockouts.
    pub blockouts: Vec<Blockout>,
    /// When the cart was saved.
    pub saved_at: DateTime<Utc>,
}

/// File-backed store for one cart.
///
/// # Examples
///
/// ```no_run
/// use term_planner::models::Selection;
/// use term_planner::storage::{dataset_fingerprint, SelectionStore};
///
/// # fn main() -> Result<(), term_planner::storage::StorageError> {
/// let records = vec![];
/// let fingerprint = dataset_fingerprint(&records)?;
/// let store = SelectionStore::new("cart.json");
/// store.save(&fingerprint, &[Selection::new("COMP1117")], &[])?;
/// assert!(store.load(&fingerprint)?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    /// Creates a store over the given cart file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cart file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists the cart, replacing any previous one.
    pub fn save(
        &self,
        fingerprint: &str,
        selections: &[Selection],
        blockouts: &[Blockout],
    ) -> Result<(), StorageError> {
        let cart = SavedCart {
            fingerprint: fingerprint.to_string(),
            selections: selections.to_vec(),
            blockouts: blockouts.to_vec(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&cart)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Loads the cart saved for the given dataset.
    ///
    /// A missing file is `None`. A cart saved against a different dataset,
    /// or one that no longer parses, is discarded and also `None`.
    pub fn load(&self, current_fingerprint: &str) -> Result<Option<SavedCart>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let cart: SavedCart = match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                log::warn!("discarding unreadable saved cart: {e}");
                self.clear()?;
                return Ok(None);
            }
        };
        if cart.fingerprint != current_fingerprint {
            log::info!("saved cart belongs to a different dataset, discarding");
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(cart))
    }

    /// Removes the cart file. Absence is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a cart file exists (its fingerprint may still mismatch).
    pub fn has_saved(&self) -> bool {
        self.path.exists()
    }
}
