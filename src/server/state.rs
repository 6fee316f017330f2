use crate::config::Config;
use crate::core::{Deck, ProgressTracker};
use crate::db::Database;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub db: Arc<Database>,
    pub deck: Deck,
    pub tracker: ProgressTracker,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Arc<Self> {
        let db = Arc::new(db);

        Arc::new(Self {
            config,
            deck: Deck::new(Arc::clone(&db)),
            tracker: ProgressTracker::new(Arc::clone(&db)),
            db,
        })
    }
}
