use crate::core::sheet::ExpenseSheet;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Errors from loading or saving a sheet snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A persisted sheet with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSnapshot {
    /// Unique identifier for this snapshot.
    pub id: Uuid,
    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// The sheet itself.
    pub sheet: ExpenseSheet,
}

/// Callback invoked after every successful save.
pub type Listener = Box<dyn Fn(&ExpenseSheet)>;

/// A file-backed state holder for one expense sheet.
///
/// The engine itself persists nothing; callers own snapshotting input
/// and storing output. This store is that collaborator: it mirrors an
/// in-memory sheet to a JSON file and notifies subscribers after each
/// save, so independently open views can stay in step through explicit
/// pub/sub instead of implicit reactivity.
///
/// # Examples
///
/// ```no_run
/// use split_settle::core::sheet::ExpenseSheet;
/// use split_settle::store::persisted::SheetStore;
///
/// let mut store = SheetStore::new("sheet.json");
/// store.subscribe(|sheet| println!("saved {} people", sheet.len()));
/// store.save(&ExpenseSheet::example()).unwrap();
/// let restored = store.load().unwrap();
/// assert_eq!(restored.len(), 10);
/// ```
pub struct SheetStore {
    path: PathBuf,
    listeners: Vec<Listener>,
}

impl SheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listeners: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the last saved sheet, or the default sheet when nothing has
    /// been saved yet.
    pub fn load(&self) -> Result<ExpenseSheet, StoreError> {
        match self.load_snapshot()? {
            Some(snapshot) => Ok(snapshot.sheet),
            None => Ok(ExpenseSheet::default()),
        }
    }

    /// Load the full snapshot, if one exists.
    pub fn load_snapshot(&self) -> Result<Option<SheetSnapshot>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let snapshot: SheetSnapshot = serde_json::from_str(&content)?;
        debug!(
            "loaded snapshot {} saved at {}",
            snapshot.id, snapshot.saved_at
        );
        Ok(Some(snapshot))
    }

    /// Persist the sheet and notify every subscriber.
    pub fn save(&self, sheet: &ExpenseSheet) -> Result<SheetSnapshot, StoreError> {
        let snapshot = SheetSnapshot {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            sheet: sheet.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json)?;
        debug!("saved snapshot {} to {}", snapshot.id, self.path.display());
        for listener in &self.listeners {
            listener(sheet);
        }
        Ok(snapshot)
    }

    /// Register a callback fired after every successful save.
    pub fn subscribe(&mut self, listener: impl Fn(&ExpenseSheet) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}
