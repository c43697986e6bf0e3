//! Generic list fetcher shared by every dashboard tab.

use tracing::{debug, error};

use crate::entity::Entity;
use crate::error::StoreError;
use crate::filter::{self, ExactFilter, SearchFilter};
use crate::store::{select_as, RemoteStore};

/// Local copy of one entity's list plus its loading and error state.
///
/// Every fetch replaces the whole list. A failed fetch leaves it empty and
/// records the error in [`RecordFetcher::last_error`].
#[derive(Clone, Debug)]
pub struct RecordFetcher<E> {
    rows: Vec<E>,
    loading: bool,
    last_error: Option<StoreError>,
}

impl<E> Default for RecordFetcher<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

impl<E: Entity> RecordFetcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    /// Mark a fetch as started
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Apply the outcome of a fetch; loading clears either way
    pub fn complete(&mut self, outcome: Result<Vec<E>, StoreError>) {
        match outcome {
            Ok(rows) => {
                debug!(table = E::TABLE, rows = rows.len(), "fetched");
                self.rows = rows;
                self.last_error = None;
            }
            Err(err) => {
                error!(table = E::TABLE, error = %err, "fetch failed");
                self.rows.clear();
                self.last_error = Some(err);
            }
        }
        self.loading = false;
    }

    /// Issue the entity's list query and replace the local rows
    pub async fn refresh(&mut self, store: &dyn RemoteStore) {
        self.begin();
        let outcome = load::<E>(store).await;
        self.complete(outcome);
    }

    /// Rows passing the search filter
    pub fn visible(&self, search: &SearchFilter) -> Vec<&E> {
        filter::apply(&self.rows, search, None)
    }

    /// Rows passing both the search and the exact filter
    pub fn visible_with(&self, search: &SearchFilter, exact: &ExactFilter<E>) -> Vec<&E> {
        filter::apply(&self.rows, search, Some(exact))
    }

    /// Empty-state message, or `None` when something is visible
    pub fn empty_state(&self, search: &SearchFilter) -> Option<&'static str> {
        if self.visible(search).is_empty() {
            Some(search.empty_message::<E>())
        } else {
            None
        }
    }
}

/// Run `E`'s list query; for UI code that owns its state elsewhere
pub async fn load<E: Entity>(store: &dyn RemoteStore) -> Result<Vec<E>, StoreError> {
    select_as::<E>(store, &E::list_query()).await
}
