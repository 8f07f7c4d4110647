use crate::domain::{Item, MAX_PRICE, PRICE_SCALE, ShoppingList};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key the list snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "shoppingList";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Local key-value storage for the serialized list.
///
/// Each save fully replaces the previous snapshot.
pub trait SnapshotStore {
    /// Returns the stored snapshot, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError>;

    fn load(&self) -> Result<ShoppingList, PersistenceError> {
        Ok(match self.read()? {
            Some(snapshot) => decode_snapshot(&snapshot),
            None => ShoppingList::new(),
        })
    }

    fn save(&self, list: &ShoppingList) -> Result<(), PersistenceError> {
        let snapshot = encode_snapshot(list)?;
        self.write(&snapshot)
    }
}

pub fn encode_snapshot(list: &ShoppingList) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(list)?)
}

/// Decodes a stored snapshot without trusting it.
///
/// Anything that is not a JSON array yields an empty list. Entries that do
/// not parse, have a blank name, or a negative price or one above
/// [`MAX_PRICE`] are dropped. Prices are rounded back to whole pence.
pub fn decode_snapshot(snapshot: &str) -> ShoppingList {
    let entries = match serde_json::from_str::<Value>(snapshot) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            warn!(kind = json_kind(&other), "stored list is not an array, starting empty");
            return ShoppingList::new();
        }
        Err(e) => {
            warn!(error = %e, "stored list is not valid JSON, starting empty");
            return ShoppingList::new();
        }
    };

    let total = entries.len();
    let items: Vec<Item> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Item>(entry) {
            Ok(item) if item.name.trim().is_empty() => {
                warn!(index, "dropping stored item with empty name");
                None
            }
            Ok(item) if item.price.is_sign_negative() && !item.price.is_zero() => {
                warn!(index, price = %item.price, "dropping stored item with negative price");
                None
            }
            Ok(item) if item.price > MAX_PRICE => {
                warn!(index, price = %item.price, "dropping stored item with oversized price");
                None
            }
            Ok(mut item) => {
                item.price = item.price.round_dp(PRICE_SCALE);
                Some(item)
            }
            Err(e) => {
                warn!(index, error = %e, "dropping malformed stored item");
                None
            }
        })
        .collect();

    debug!(loaded = items.len(), stored = total, "decoded list snapshot");
    ShoppingList::from_items(items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Stores the snapshot as `<dir>/shoppingList.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SNAPSHOT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for FileStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, snapshot).map_err(|e| self.io_error(e))
    }
}

/// In-process store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot.into())),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.snapshot.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.snapshot())
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        *self.snapshot.borrow_mut() = Some(snapshot.to_string());
        Ok(())
    }
}
