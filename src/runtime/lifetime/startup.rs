use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{ProgressReporter, TracingProgress};
use crate::storage::{self, Storage};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub progress: Arc<dyn ProgressReporter>,
}

/// 准备服务器启动的上下文
/// 包括存储目录和进度上报
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    debug!(
        "Effective configuration: {}",
        serde_json::to_string(config).unwrap_or_else(|e| format!("<unserializable: {e}>"))
    );

    let storage = storage::create_storage(&config.upload)?;
    warn!(
        "Local storage initialized at {} (naming: {:?}, max file size: {} bytes)",
        config.upload.dir, config.upload.naming, config.upload.max_file_size
    );

    if config.upload.rollback_on_failure {
        warn!("Batch rollback enabled: failed multi-file uploads remove earlier files");
    }

    Ok(StartupContext {
        storage,
        progress: Arc::new(TracingProgress),
    })
}
