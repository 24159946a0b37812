//! Builds the application state shared by the rendering subcommands.

use crate::config::Config;
use crate::core::AppState;
use crate::core::pinned::PinnedStore;
use crate::core::reporter::{ConsoleReporter, ErrorReport, ErrorReporter};
use crate::db::{KeyValueStorage, MemoryStorage, SqliteStorage};
use crate::errors::AppResult;
use crate::models::dataset::load_dataset;
use std::rc::Rc;

pub struct Session {
    pub state: AppState,
    pub reporter: Rc<ConsoleReporter>,
}

/// Load the dataset (fatal on failure) and open the pinned store.
/// Storage that cannot be opened degrades to in-memory pins.
pub fn open_session(cfg: &Config) -> AppResult<Session> {
    let reporter = Rc::new(ConsoleReporter::new());
    let shared: Rc<dyn ErrorReporter> = reporter.clone();

    let records = load_dataset(cfg.settings.data_url.as_deref(), &cfg.domain.field_map)?;
    log::info!("loaded {} records", records.len());

    let storage: Box<dyn KeyValueStorage> = match SqliteStorage::open(&cfg.database) {
        Ok(s) => Box::new(s),
        Err(e) => {
            shared.report(
                ErrorReport::new("Pinned events will not be saved", &e)
                    .with_context("operation", "openStorage")
                    .with_context("database", &cfg.database),
            );
            Box::new(MemoryStorage::new())
        }
    };

    let pinned = PinnedStore::open(storage, cfg.domain.id.as_deref(), shared.clone());
    let state = AppState::new(records, pinned, &cfg.features, &cfg.settings, shared);

    Ok(Session { state, reporter })
}
