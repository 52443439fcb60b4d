use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use super::{UploadService, check_size, open_part};
use crate::errors::{Result, UploadError};
use crate::models::{SINGLE_FIELD, SingleUploadForm, UPLOAD_SUCCESS_MESSAGE, UploadSource};

pub async fn handle_single_upload(
    service: &UploadService,
    req: &HttpRequest,
    form: SingleUploadForm,
) -> Result<HttpResponse> {
    let config = service.get_config(req);
    let storage = service.get_storage(req)?;
    let reporter = service.get_progress_reporter(req);

    // 没有 filename 的同名字段不是文件
    if !form.image.is_file() {
        return Err(UploadError::field_missing(format!(
            "no file part named \"{SINGLE_FIELD}\" in form"
        )));
    }

    // 临时文件在 form 被 drop 时删除
    let source = UploadSource::from_part(SINGLE_FIELD, &form.image);
    let mut part = open_part(&source).await?;

    check_size(&source, config.max_file_size)?;

    let stored = storage.store(&mut part, &source, Some(reporter)).await?;

    info!(
        "Stored upload '{}' as {} ({} bytes)",
        stored.original_name, stored.storage_key, stored.size
    );

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(UPLOAD_SUCCESS_MESSAGE))
}
