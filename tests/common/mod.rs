#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use actix_web::dev::ServiceResponse;
use actix_web::{App, test};

use rust_upload_server::config::UploadConfig;
use rust_upload_server::models::ProgressUpdate;
use rust_upload_server::routes::configure_app;
use rust_upload_server::services::{ProgressReporter, TracingProgress};
use rust_upload_server::storage::{self, Storage};

pub const BOUNDARY: &str = "----upload-server-test-boundary";

pub struct Part<'a> {
    pub field: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(field: &'a str, filename: &'a str, data: &'a [u8]) -> Self {
        Self {
            field,
            filename: Some(filename),
            data,
        }
    }

    pub fn text(field: &'a str, value: &'a str) -> Self {
        Self {
            field,
            filename: None,
            data: value.as_bytes(),
        }
    }
}

/// 手工拼装 multipart/form-data 请求体
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.field, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n",
                        part.field
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// 以临时目录为存储目录的上传配置
pub fn test_config(dir: &Path) -> UploadConfig {
    UploadConfig {
        dir: dir.join("uploads").display().to_string(),
        index_file: dir.join("index.html").display().to_string(),
        ..UploadConfig::default()
    }
}

pub fn storage_for(config: &UploadConfig) -> Arc<dyn Storage> {
    storage::create_storage(config).expect("storage should initialize")
}

pub fn tracing_reporter() -> Arc<dyn ProgressReporter> {
    Arc::new(TracingProgress)
}

/// 以默认存储和日志进度上报初始化应用并发送请求
pub async fn call_app(config: &UploadConfig, req: test::TestRequest) -> ServiceResponse {
    call_app_with(config, storage_for(config), tracing_reporter(), req).await
}

pub async fn call_app_with(
    config: &UploadConfig,
    storage: Arc<dyn Storage>,
    reporter: Arc<dyn ProgressReporter>,
    req: test::TestRequest,
) -> ServiceResponse {
    let app = test::init_service(App::new().configure(configure_app(
        config.clone(),
        storage,
        reporter,
    )))
    .await;
    test::call_service(&app, req.to_request()).await
}

/// 上传目录中的文件，按文件名排序
pub fn stored_files(config: &UploadConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(&config.dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

#[derive(Default)]
pub struct RecordingProgress {
    pub updates: Mutex<Vec<ProgressUpdate>>,
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}
