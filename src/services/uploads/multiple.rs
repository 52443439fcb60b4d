use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{info, warn};

use super::{UploadService, check_size, open_part};
use crate::errors::{Result, UploadError};
use crate::models::{
    MULTIPLE_FIELD, MultipleUploadForm, StoredFile, UPLOAD_SUCCESS_MESSAGE, UploadSource,
};
use crate::storage::Storage;

pub async fn handle_multiple_upload(
    service: &UploadService,
    req: &HttpRequest,
    form: MultipleUploadForm,
) -> Result<HttpResponse> {
    let config = service.get_config(req);
    let storage = service.get_storage(req)?;

    // 只处理带 filename 的部分，同名的普通字段直接忽略
    let parts: Vec<_> = form.images.iter().filter(|part| part.is_file()).collect();
    if parts.is_empty() {
        return Err(UploadError::field_missing(format!(
            "no file part named \"{MULTIPLE_FIELD}\" in form"
        )));
    }

    let mut stored_batch: Vec<StoredFile> = Vec::with_capacity(parts.len());

    for part in parts {
        let source = UploadSource::from_part(MULTIPLE_FIELD, part);

        match store_part(storage.as_ref(), &source, config.max_file_size).await {
            Ok(stored) => stored_batch.push(stored),
            Err(e) => {
                if config.rollback_on_failure {
                    rollback(&storage, &stored_batch).await;
                }
                return Err(e);
            }
        }
    }

    info!(
        "Stored {} uploads: {}",
        stored_batch.len(),
        stored_batch
            .iter()
            .map(|f| format!("'{}' -> {}", f.original_name, f.storage_key))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(UPLOAD_SUCCESS_MESSAGE))
}

/// 单个部分：打开、校验大小、写入，不上报进度
async fn store_part(
    storage: &dyn Storage,
    source: &UploadSource,
    max_file_size: usize,
) -> Result<StoredFile> {
    let mut part = open_part(source).await?;
    check_size(source, max_file_size)?;
    storage.store(&mut part, source, None).await
}

/// 删除本批次已写入的文件，删除失败只记录日志
async fn rollback(storage: &Arc<dyn Storage>, stored_batch: &[StoredFile]) {
    for file in stored_batch {
        match storage.remove(file).await {
            Ok(()) => warn!("Rolled back {}", file.storage_key),
            Err(e) => warn!("Rollback of {} failed: {}", file.storage_key, e),
        }
    }
}
