use actix_multipart::MultipartError;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::error::PayloadError;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::config::UploadConfig;
use crate::errors::{Result, UploadError};
use crate::models::{MultipleUploadForm, SingleUploadForm};
use crate::services::UploadService;
use crate::services::uploads::human_size;

static UPLOAD_SERVICE: UploadService = UploadService;

pub async fn handle_single_upload(
    request: HttpRequest,
    form: std::result::Result<MultipartForm<SingleUploadForm>, actix_web::Error>,
) -> Result<HttpResponse> {
    let form = form.map_err(form_error)?;
    UPLOAD_SERVICE
        .handle_single_upload(&request, form.into_inner())
        .await
}

pub async fn handle_multiple_upload(
    request: HttpRequest,
    form: std::result::Result<MultipartForm<MultipleUploadForm>, actix_web::Error>,
) -> Result<HttpResponse> {
    let form = form.map_err(form_error)?;
    UPLOAD_SERVICE
        .handle_multiple_upload(&request, form.into_inner())
        .await
}

/// Content-Type 校验失败时提取器不经过表单错误处理器，这里统一转换
fn form_error(err: actix_web::Error) -> UploadError {
    match err.as_error::<UploadError>() {
        Some(upload_error) => upload_error.clone(),
        None => {
            let upload_error = UploadError::form_parse(format!("Unable to parse form: {err}"));
            tracing::error!("{}", upload_error);
            upload_error
        }
    }
}

/// 表单解析配置
///
/// 请求体超过 `max_request_size` 映射为 400；缺少字段为 `FieldMissing`，
/// 字段读取器自己的错误原样返回，其余为 `FormParse`。
pub fn multipart_form_config(config: &UploadConfig) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(config.max_request_size)
        .memory_limit(config.memory_limit)
        .error_handler(multipart_error_handler)
}

fn multipart_error_handler(err: MultipartError, req: &HttpRequest) -> actix_web::Error {
    let upload_error = match &err {
        MultipartError::MissingField(_) => UploadError::field_missing(err.to_string()),
        MultipartError::Payload(PayloadError::Overflow) => {
            let max_request_size = req
                .app_data::<web::Data<UploadConfig>>()
                .map_or(UploadConfig::default().max_request_size, |config| {
                    config.max_request_size
                });
            UploadError::size_limit_exceeded(format!(
                "request size cannot be bigger than {}",
                human_size(max_request_size)
            ))
        }
        MultipartError::Field { source, .. } => match source.as_error::<UploadError>() {
            Some(inner) => inner.clone(),
            None => UploadError::form_parse(format!("Unable to parse form: {source}")),
        },
        _ => UploadError::form_parse(format!("Unable to parse form: {err}")),
    };
    if upload_error.is_client_error() {
        tracing::warn!("{}", upload_error);
    } else {
        tracing::error!("{}", upload_error);
    }
    upload_error.into()
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(handle_single_upload))
        .route("/uploadmultiple", web::post().to(handle_multiple_upload));
}
