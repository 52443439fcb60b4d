pub mod index;

pub mod uploads;

use actix_web::web;
use std::sync::Arc;

use crate::config::UploadConfig;
use crate::services::ProgressReporter;
use crate::storage::Storage;

pub use index::configure_index_routes;
pub use uploads::{configure_upload_routes, multipart_form_config};

/// 注册 app data 与全部路由
///
/// 上传接口依赖的配置、存储后端和进度上报都通过 app data 注入。
pub fn configure_app(
    upload: UploadConfig,
    storage: Arc<dyn Storage>,
    reporter: Arc<dyn ProgressReporter>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(multipart_form_config(&upload))
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(reporter))
            .app_data(web::Data::new(upload));

        configure_upload_routes(cfg);
        configure_index_routes(cfg);
    }
}
