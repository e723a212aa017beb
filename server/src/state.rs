use std::sync::Arc;

use crate::config::Config;
use crate::ocr::PosterScanner;
use crate::store::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn KeyValueStore>,
    pub scanner: PosterScanner,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, scanner: PosterScanner) -> Self {
        Self {
            config: Arc::new(config),
            store,
            scanner,
        }
    }
}
