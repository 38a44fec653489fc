use log::{debug, info};

use crate::*;

/// One user session: a store and the collection mirroring it.
///
/// The collection is read from the store at most once. Mutations hydrate the
/// collection first when needed, so a session never writes before it has read.
///
/// ```
/// use championship::*;
///
/// let store = vec![SheetRow::marker("Spring Open")];
/// let mut session = Session::create(store);
/// session.hydrate_once()?;
/// session.create_championship("Autumn")?;
/// assert_eq!(session.collection().names(), vec!["Spring Open", "Autumn"]);
///
/// let store = session.dispose();
/// assert_eq!(store.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Session<S: RowStore> {
    store: S,
    collection: Collection,
}

impl<S: RowStore> Session<S> {
    pub fn create(store: S) -> Session<S> {
        Session {
            store,
            collection: Collection::new(),
        }
    }

    /// Reads the store into the collection, the first time only.
    ///
    /// A failed read leaves the session unhydrated so that it may be retried.
    pub fn hydrate_once(&mut self) -> Result<HydrateOutcome, S::Error> {
        if self.collection.is_hydrated() {
            debug!("hydrate_once: session already hydrated");
            return Ok(HydrateOutcome::AlreadyHydrated);
        }
        let rows = self.store.read_all()?;
        info!("hydrate_once: read {} rows from the store", rows.len());
        Ok(self.collection.hydrate(&rows))
    }

    pub fn create_championship(&mut self, name: &str) -> Result<&Championship, ModelError> {
        self.ensure_hydrated()?;
        self.collection.create_championship(&mut self.store, name)
    }

    pub fn log_match(
        &mut self,
        championship_name: &str,
        m: Match,
    ) -> Result<&Championship, ModelError> {
        self.ensure_hydrated()?;
        self.collection
            .log_match(&mut self.store, championship_name, m)
    }

    pub fn select(&self, championship_name: &str) -> Result<&Championship, ModelError> {
        self.collection.select(championship_name)
    }

    pub fn all_matches(&self) -> Vec<&Match> {
        self.collection.all_matches()
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ends the session, handing back the store.
    pub fn dispose(self) -> S {
        debug!(
            "dispose: closing session with {} championships",
            self.collection.len()
        );
        self.store
    }

    fn ensure_hydrated(&mut self) -> Result<(), ModelError> {
        self.hydrate_once()
            .map(|_| ())
            .map_err(|e| ModelError::StoreRead(Box::new(e)))
    }
}
