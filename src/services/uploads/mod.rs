pub mod multiple;
pub mod progress;
pub mod single;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tokio::fs::File;
use tracing::{error, warn};

use crate::config::{AppConfig, UploadConfig};
use crate::errors::{Result, UploadError};
use crate::models::{MultipleUploadForm, SingleUploadForm, UploadSource};
use crate::storage::Storage;
use progress::{ProgressReporter, TracingProgress};

/// 上传服务，依赖全部从请求的 app data 中获取
pub struct UploadService;

impl UploadService {
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .map(|storage| storage.get_ref().clone())
            .ok_or_else(|| UploadError::config("Storage not found in app data"))
    }

    pub(crate) fn get_config(&self, request: &HttpRequest) -> UploadConfig {
        request
            .app_data::<web::Data<UploadConfig>>()
            .map(|config| config.get_ref().clone())
            .unwrap_or_else(|| AppConfig::get().upload.clone())
    }

    pub(crate) fn get_progress_reporter(&self, request: &HttpRequest) -> Arc<dyn ProgressReporter> {
        request
            .app_data::<web::Data<Arc<dyn ProgressReporter>>>()
            .map(|reporter| reporter.get_ref().clone())
            .unwrap_or_else(|| Arc::new(TracingProgress))
    }

    // Handle single file upload
    pub async fn handle_single_upload(
        &self,
        request: &HttpRequest,
        form: SingleUploadForm,
    ) -> Result<HttpResponse> {
        single::handle_single_upload(self, request, form)
            .await
            .inspect_err(log_upload_error)
    }

    // Handle multiple file upload
    pub async fn handle_multiple_upload(
        &self,
        request: &HttpRequest,
        form: MultipleUploadForm,
    ) -> Result<HttpResponse> {
        multiple::handle_multiple_upload(self, request, form)
            .await
            .inspect_err(log_upload_error)
    }
}

/// 打开表单解析器落盘的上传部分
pub(crate) async fn open_part(source: &UploadSource) -> Result<File> {
    File::open(source.path()).await.map_err(|e| {
        UploadError::file_operation(format!(
            "Failed to open uploaded part '{}': {e}",
            source.original_name
        ))
    })
}

/// 校验声明大小
pub(crate) fn check_size(source: &UploadSource, max_file_size: usize) -> Result<()> {
    if source.declared_size > max_file_size as u64 {
        return Err(UploadError::size_limit_exceeded(format!(
            "file sizes cannot be bigger than {}",
            human_size(max_file_size)
        )));
    }
    Ok(())
}

pub(crate) fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}mb", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}kb", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

fn log_upload_error(err: &UploadError) {
    if err.is_client_error() {
        warn!("Upload rejected: {}", err);
    } else {
        error!("{}", err);
    }
}
