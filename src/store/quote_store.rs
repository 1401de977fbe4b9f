//! In-memory quote store with whole-file JSON persistence.
//!
//! All operations take the same lock for their whole duration, so adds and
//! deletes are linearizable and list/random never see a half-applied change.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

use super::errors::{StoreError, StoreResult};
use crate::observability::Logger;
use crate::quote::{Quote, QuoteId, StoredQuote};

/// Everything the lock guards.
struct StoreState {
    quotes: Vec<StoredQuote>,
    /// Strictly greater than every id ever assigned.
    next_id: QuoteId,
    rng: StdRng,
}

/// The quote store.
///
/// Owns the collection and the id counter; callers only ever get clones.
pub struct QuoteStore {
    state: Mutex<StoreState>,
    logger: Arc<Logger>,
}

impl QuoteStore {
    /// Open the store backed by `path`.
    ///
    /// - Missing file: created empty (parent directories too), store is empty
    /// - Empty file: store is empty
    /// - Otherwise the file must hold a JSON array of stored quotes
    pub fn open(path: impl AsRef<Path>, logger: Arc<Logger>) -> StoreResult<Self> {
        Self::open_with_rng(path.as_ref(), logger, StdRng::seed_from_u64(time_seed()))
    }

    /// Same as [`QuoteStore::open`] with a fixed random seed.
    pub fn open_with_seed(
        path: impl AsRef<Path>,
        logger: Arc<Logger>,
        seed: u64,
    ) -> StoreResult<Self> {
        Self::open_with_rng(path.as_ref(), logger, StdRng::seed_from_u64(seed))
    }

    /// An empty store with no backing file.
    pub fn in_memory(logger: Arc<Logger>) -> Self {
        Self::from_parts(Vec::new(), 1, logger, StdRng::seed_from_u64(time_seed()))
    }

    fn open_with_rng(path: &Path, logger: Arc<Logger>, rng: StdRng) -> StoreResult<Self> {
        let path_str = path.display().to_string();

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                create_empty_file(path)?;
                logger.info("STORE_FILE_CREATED", &[("path", path_str.as_str())]);
                return Ok(Self::from_parts(Vec::new(), 1, logger, rng));
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            logger.info("STORE_FILE_EMPTY", &[("path", path_str.as_str())]);
            return Ok(Self::from_parts(Vec::new(), 1, logger, rng));
        }

        let quotes: Vec<StoredQuote> = serde_json::from_slice(&data).map_err(StoreError::Decode)?;
        let next_id = validate_ids(&quotes)?;

        let count = quotes.len().to_string();
        let next = next_id.to_string();
        logger.info(
            "STORE_OPENED",
            &[
                ("path", path_str.as_str()),
                ("quotes", count.as_str()),
                ("next_id", next.as_str()),
            ],
        );

        Ok(Self::from_parts(quotes, next_id, logger, rng))
    }

    fn from_parts(
        quotes: Vec<StoredQuote>,
        next_id: QuoteId,
        logger: Arc<Logger>,
        rng: StdRng,
    ) -> Self {
        Self {
            state: Mutex::new(StoreState {
                quotes,
                next_id,
                rng,
            }),
            logger,
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Internal("Lock poisoned".into()))
    }

    /// Append a quote under the next id.
    pub fn add(&self, quote: Quote) -> StoreResult<StoredQuote> {
        let mut state = self.lock()?;

        let next_id = state
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;

        let stored = quote.with_id(state.next_id);
        state.quotes.push(stored.clone());
        state.next_id = next_id;

        Ok(stored)
    }

    /// All quotes without their ids, in insertion order.
    ///
    /// An empty store is an error, not an empty list.
    pub fn list(&self) -> StoreResult<Vec<Quote>> {
        let state = self.lock()?;
        if state.quotes.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(state.quotes.iter().map(StoredQuote::to_quote).collect())
    }

    /// All quotes with their ids, in insertion order. Same empty policy as `list`.
    pub fn list_stored(&self) -> StoreResult<Vec<StoredQuote>> {
        let state = self.lock()?;
        if state.quotes.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(state.quotes.clone())
    }

    /// One quote picked uniformly at random.
    pub fn random(&self) -> StoreResult<Quote> {
        let mut state = self.lock()?;
        if state.quotes.is_empty() {
            return Err(StoreError::Empty);
        }
        let len = state.quotes.len();
        let index = state.rng.gen_range(0..len);
        Ok(state.quotes[index].to_quote())
    }

    /// Remove the quote with `id`. Ids are never handed out again.
    pub fn delete(&self, id: QuoteId) -> StoreResult<()> {
        let mut state = self.lock()?;
        let index = state
            .quotes
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;
        state.quotes.remove(index);
        Ok(())
    }

    /// Write every stored quote to `path`, replacing its content.
    ///
    /// The data goes to a temporary file next to `path` first and is renamed
    /// over it, so a failed save leaves the previous file intact.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let state = self.lock()?;

        let data = serde_json::to_vec(&state.quotes).map_err(StoreError::Encode)?;
        let bytes = data.len().to_string();
        let count = state.quotes.len().to_string();
        self.logger.info(
            "STORE_SERIALIZED",
            &[("bytes", bytes.as_str()), ("quotes", count.as_str())],
        );

        write_atomically(path, &data).map_err(|e| StoreError::io(path, e))?;
        self.logger.info("STORE_SAVED", &[("path", path_str.as_str())]);

        Ok(())
    }

    /// Number of stored quotes
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.quotes.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.quotes.is_empty())
    }

    /// The id the next `add` will assign
    pub fn next_id(&self) -> StoreResult<QuoteId> {
        Ok(self.lock()?.next_id)
    }
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("QuoteStore");
        if let Ok(state) = self.state.try_lock() {
            debug
                .field("quotes", &state.quotes.len())
                .field("next_id", &state.next_id);
        }
        debug.finish_non_exhaustive()
    }
}

/// Checks ids are positive and distinct, returns the id to assign next.
fn validate_ids(quotes: &[StoredQuote]) -> StoreResult<QuoteId> {
    let mut seen = HashSet::with_capacity(quotes.len());
    for quote in quotes {
        if quote.id == 0 {
            return Err(StoreError::InvalidData("quote id 0 is not allowed".into()));
        }
        if !seen.insert(quote.id) {
            return Err(StoreError::InvalidData(format!("duplicate quote id {}", quote.id)));
        }
    }
    quotes
        .iter()
        .map(|q| q.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| StoreError::InvalidData("id space exhausted".into()))
}

fn create_empty_file(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    File::create(path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

fn write_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
