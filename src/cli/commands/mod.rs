//! CLI command implementations

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod sync;

pub use add::execute as add;
pub use config::execute as config;
pub use delete::execute as delete;
pub use edit::execute as edit;
pub use list::execute as list;
pub use search::execute as search;
pub use sync::execute as sync;

use crate::config::{Config, ConfigManager};
use crate::directory::Coordinator;
use crate::error::RoloResult;
use crate::remote::HttpRecordService;
use crate::store::FsBlobStore;

/// Open the directory coordinator against the configured remote service
/// and the file-backed cache blob under the state directory
pub(crate) async fn open_coordinator(
    config: &Config,
) -> RoloResult<Coordinator<HttpRecordService, FsBlobStore>> {
    let service = HttpRecordService::new(config.remote.base_url.clone());
    let store = FsBlobStore::new(ConfigManager::state_dir());
    Coordinator::open(service, store).await
}
