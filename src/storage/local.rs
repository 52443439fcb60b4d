use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use super::Storage;
use crate::config::NamingStrategy;
use crate::errors::{Result, UploadError};
use crate::models::{StoredFile, UploadSource};
use crate::services::uploads::progress::{ProgressReporter, ProgressTracker};
use crate::utils::{file_extension, storage_key};

/// 本地文件系统存储，所有文件平铺在同一个目录下
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
    naming: NamingStrategy,
    chunk_size: usize,
}

impl LocalStorage {
    pub fn new(dir: impl AsRef<Path>, naming: NamingStrategy, chunk_size: usize) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        // 确保上传目录存在
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                UploadError::file_operation(format!(
                    "Failed to create upload directory {}: {e}",
                    dir.display()
                ))
            })?;
        }

        Ok(Self {
            dir,
            naming,
            chunk_size: chunk_size.max(1),
        })
    }
}

#[async_trait::async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        source: &UploadSource,
        progress: Option<Arc<dyn ProgressReporter>>,
    ) -> Result<StoredFile> {
        let now = chrono::Utc::now();
        let extension = file_extension(&source.original_name);
        let key = storage_key(self.naming, now, extension.as_deref());
        let path = self.dir.join(&key);

        let mut local_file = fs::File::create(&path)
            .await
            .map_err(|e| UploadError::local_file_create(e.to_string()))?;

        let mut tracker = progress.map(|reporter| ProgressTracker::new(source.declared_size, reporter));
        let mut buffer = vec![0u8; self.chunk_size];
        let mut written: u64 = 0;

        loop {
            let read = reader
                .read(&mut buffer)
                .await
                .map_err(|e| UploadError::copy_io(e.to_string()))?;

            if read == 0 {
                break;
            }

            local_file
                .write_all(&buffer[..read])
                .await
                .map_err(|e| UploadError::copy_io(e.to_string()))?;
            written += read as u64;

            if let Some(tracker) = tracker.as_mut() {
                tracker.observe(read);
            }
        }

        // tokio 的 File 在 drop 前需要 flush，否则最后一次写入可能尚未完成
        local_file
            .flush()
            .await
            .map_err(|e| UploadError::copy_io(e.to_string()))?;

        if let Some(tracker) = tracker {
            tracker.finish();
        }

        if written != source.declared_size {
            warn!(
                "Stored {} bytes for '{}' but {} were declared",
                written, source.original_name, source.declared_size
            );
        }

        debug!(
            "Stored {} part '{}' ({} bytes) as {}",
            source.field_name,
            source.original_name,
            written,
            path.display()
        );

        Ok(StoredFile {
            storage_key: key,
            path,
            original_name: source.original_name.clone(),
            extension: extension.unwrap_or_default(),
            size: written,
            stored_at: now,
        })
    }

    async fn remove(&self, file: &StoredFile) -> Result<()> {
        fs::remove_file(&file.path).await.map_err(|e| {
            UploadError::file_operation(format!("Failed to remove {}: {e}", file.path.display()))
        })
    }
}
