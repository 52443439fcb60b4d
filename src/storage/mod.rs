use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::config::UploadConfig;
use crate::errors::Result;
use crate::models::{StoredFile, UploadSource};
use crate::services::uploads::progress::ProgressReporter;

pub mod local;

pub use local::LocalStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 把一个上传部分写入存储
    ///
    /// `progress` 为 `Some` 时每拷贝一个数据块上报一次累计进度。
    /// 出错时已写入的部分数据保留，由调用方决定是否清理。
    async fn store(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        source: &UploadSource,
        progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<StoredFile>;

    /// 删除一个已存储的文件
    async fn remove(&self, file: &StoredFile) -> Result<()>;
}

/// 根据配置创建存储后端
pub fn create_storage(config: &UploadConfig) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.dir, config.naming, config.progress_chunk_size)?;
    Ok(Arc::new(storage))
}
