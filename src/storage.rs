//! Persistent cart storage.
//!
//! The cart is stored as a JSON array of line items under a single key.
//! [`FileCartRepository`] keeps it in `<storage_dir>/cart.json`;
//! [`InMemoryCartRepository`] keeps it in a string for tests and ephemeral
//! sessions.
//!
//! Reads never fail on bad contents: a corrupt or foreign value degrades to
//! an empty cart, and an unreadable line is dropped on its own. Writes are
//! not locked, so two processes sharing a storage directory race and the
//! last writer wins.

use crate::config;
use crate::error::Result;
use crate::models::{Cart, CartLineItem};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load/save/clear access to the persisted cart.
pub trait CartRepository: Send {
    /// Read the stored cart, or an empty one if nothing valid is stored.
    fn load(&self) -> Result<Cart>;

    /// Replace the stored cart.
    fn save(&mut self, cart: &Cart) -> Result<()>;

    /// Delete the stored cart entirely.
    fn clear(&mut self) -> Result<()>;
}

/// Parse a stored cart value, falling back to an empty cart.
///
/// Lines are read one at a time; a line that cannot be turned into a line
/// item is skipped and the rest are kept.
pub fn parse_cart(raw: &str) -> Cart {
    if raw.trim().is_empty() || raw.trim() == "null" {
        return Cart::new();
    }
    let lines = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(lines)) => lines,
        Ok(_) => {
            warn!("stored cart is not an array; using an empty cart");
            return Cart::new();
        }
        Err(e) => {
            warn!(error = %e, "stored cart is not valid JSON; using an empty cart");
            return Cart::new();
        }
    };

    let items: Vec<CartLineItem> = lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| match serde_json::from_value::<CartLineItem>(line) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable cart line");
                None
            }
        })
        .collect();
    Cart::from(items)
}

// ---------------------------------------------------------------------------
// FileCartRepository
// ---------------------------------------------------------------------------

/// Cart stored as a JSON file in a storage directory.
pub struct FileCartRepository {
    /// Directory holding the cart file.
    pub storage_dir: PathBuf,
}

impl FileCartRepository {
    /// Create a repository rooted at `storage_dir`.
    ///
    /// If `storage_dir` is `None`, uses the platform data directory.
    /// Creates the directory if it does not exist.
    pub fn new(storage_dir: Option<PathBuf>) -> Result<Self> {
        let dir = storage_dir.unwrap_or_else(config::default_storage_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { storage_dir: dir })
    }

    pub fn path(&self) -> PathBuf {
        self.storage_dir.join(format!("{}.json", config::CART_KEY))
    }

    /// Write to a temp file in the same directory and rename it into place.
    fn write_atomic(&self, dest: &Path, contents: &[u8]) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.storage_dir)?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        tmp.persist(dest).map_err(|e| e.error)?;
        Ok(())
    }
}

impl CartRepository for FileCartRepository {
    fn load(&self) -> Result<Cart> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(parse_cart(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Cart::new()),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %path.display(), "cart file is not UTF-8; using an empty cart");
                Ok(Cart::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, cart: &Cart) -> Result<()> {
        let json = serde_json::to_vec(cart)?;
        let path = self.path();
        self.write_atomic(&path, &json)?;
        debug!(path = %path.display(), items = cart.len(), "cart saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// InMemoryCartRepository
// ---------------------------------------------------------------------------

/// Cart held as a serialized string in memory.
///
/// Stores the same JSON text the file repository would, so the safe-parse
/// path is exercised identically.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartRepository {
    value: Option<String>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary raw stored value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
        }
    }

    /// The raw stored value, if any.
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl CartRepository for InMemoryCartRepository {
    fn load(&self) -> Result<Cart> {
        Ok(self.value.as_deref().map(parse_cart).unwrap_or_default())
    }

    fn save(&mut self, cart: &Cart) -> Result<()> {
        self.value = Some(serde_json::to_string(cart)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}
