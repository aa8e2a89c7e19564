//! Published menu state shared between reloads and readers.
//!
//! Reloads are serialized by a writer lock.  A new [`LoadedMenu`] is built
//! completely off to the side and then swapped in as a whole, so readers
//! holding a snapshot never see a partially built menu.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fetch::{ScriptFetcher, ScriptSource};
use crate::load::{load, LoadedMenu};
use crate::var::VarStore;

/// The currently published menu plus the defaults every reload starts from.
#[derive(Debug)]
pub struct MenuState {
    defaults: VarStore,
    published: RwLock<Arc<LoadedMenu>>,
    reload_lock: Mutex<()>,
}

impl MenuState {
    /// Start with an empty menu published.
    pub fn new(defaults: VarStore) -> Self {
        Self {
            defaults,
            published: RwLock::new(Arc::new(LoadedMenu::empty())),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn defaults(&self) -> &VarStore {
        &self.defaults
    }

    /// The menu as of the last successful load.
    pub fn snapshot(&self) -> Arc<LoadedMenu> {
        let guard = self.published.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a menu from `raw_lines` and publish it.
    pub fn publish<S: AsRef<str>>(&self, raw_lines: &[S]) -> Arc<LoadedMenu> {
        let loaded = Arc::new(load(raw_lines, &self.defaults));
        let mut guard = self.published.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&loaded);
        loaded
    }

    /// Fetch `source` and publish the result.
    ///
    /// Concurrent reloads run one at a time.  If the fetch fails the error
    /// is logged and returned, and the previously published menu stays in
    /// place.
    pub async fn reload<F: ScriptFetcher>(
        &self,
        fetcher: &F,
        source: &ScriptSource,
    ) -> Result<Arc<LoadedMenu>, FetchError> {
        let _writer = self.reload_lock.lock().await;
        match fetcher.fetch_lines(source).await {
            Ok(lines) => {
                info!(%source, lines = lines.len(), "script fetched");
                Ok(self.publish(&lines))
            }
            Err(err) => {
                warn!(%source, "keeping previous menu: {err}");
                Err(err)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
