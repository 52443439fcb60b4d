//! 首页路由
//!
//! 返回配置的本地 HTML 文件，文件不存在时返回 404。

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use std::io::ErrorKind;

use crate::config::{AppConfig, UploadConfig};
use crate::errors::{Result, UploadError};

/// 首页请求处理
pub async fn serve_index(req: HttpRequest) -> Result<HttpResponse> {
    let index_file = req
        .app_data::<web::Data<UploadConfig>>()
        .map(|config| config.index_file.clone())
        .unwrap_or_else(|| AppConfig::get().upload.index_file.clone());

    match tokio::fs::read(&index_file).await {
        Ok(data) => Ok(HttpResponse::Ok().content_type("text/html").body(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Index file {} not found", index_file);
            Ok(HttpResponse::NotFound()
                .insert_header(ContentType::plaintext())
                .body("404 page not found"))
        }
        Err(e) => {
            let err = UploadError::file_operation(format!("Failed to read {index_file}: {e}"));
            tracing::error!("{}", err);
            Err(err)
        }
    }
}

/// 配置首页路由
pub fn configure_index_routes(cfg: &mut web::ServiceConfig) {
    // 未被上传接口匹配的 GET 请求都返回首页
    cfg.route("/{tail:.*}", web::get().to(serve_index));
}
