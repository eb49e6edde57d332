use std::sync::Arc;

use common::storage::ObjectStore;
use intelligence::DocumentIntelligence;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub objects: Arc<dyn ObjectStore>,
    pub intelligence: Arc<DocumentIntelligence>,
}
