use actix_multipart::form::{FieldReader, Limits, MultipartForm};
use actix_multipart::{Field, MultipartError};
use actix_web::{HttpRequest, web};
use futures_util::TryStreamExt as _;
use futures_util::future::LocalBoxFuture;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use super::entities::UploadSource;
use crate::config::UploadConfig;
use crate::errors::UploadError;

/// 单文件上传表单的字段名
pub const SINGLE_FIELD: &str = "image";
/// 多文件上传表单的字段名
pub const MULTIPLE_FIELD: &str = "images";

/// `POST /upload` 表单
#[derive(MultipartForm)]
pub struct SingleUploadForm {
    pub image: UploadPart,
}

/// `POST /uploadmultiple` 表单，按提交顺序保存所有 `images` 部分
#[derive(MultipartForm)]
pub struct MultipleUploadForm {
    pub images: Vec<UploadPart>,
}

/// 表单解析器落盘的一个上传部分
///
/// 临时文件最多写入 `upload.max_file_size` 字节，超出的部分只读取计数不落盘，
/// 因此 `size` 始终是客户端实际提交的字节数，超限判断交给上传服务完成。
#[derive(Debug)]
pub struct UploadPart {
    pub file: NamedTempFile,
    pub file_name: Option<String>,
    pub size: usize,
}

impl UploadPart {
    /// 带有非空 filename 的部分才算文件
    pub fn is_file(&self) -> bool {
        self.file_name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

impl<'t> FieldReader<'t> for UploadPart {
    type Future = LocalBoxFuture<'t, Result<Self, MultipartError>>;

    fn read_field(req: &'t HttpRequest, mut field: Field, limits: &'t mut Limits) -> Self::Future {
        Box::pin(async move {
            let spool_limit = req
                .app_data::<web::Data<UploadConfig>>()
                .map_or(UploadConfig::default().max_file_size, |config| {
                    config.max_file_size
                });
            let field_name = field.name().unwrap_or_default().to_string();
            let field_error = |err: std::io::Error| MultipartError::Field {
                name: field_name.clone(),
                source: UploadError::file_operation(format!(
                    "Failed to spool part '{field_name}': {err}"
                ))
                .into(),
            };

            let file = NamedTempFile::new().map_err(field_error)?;
            let mut spool = tokio::fs::File::from_std(file.reopen().map_err(field_error)?);
            let mut size = 0usize;

            while let Some(chunk) = field.try_next().await? {
                // 已超限的部分继续读完以便得到完整大小，但不再写入
                if size.saturating_add(chunk.len()) <= spool_limit {
                    limits.try_consume_limits(chunk.len(), false)?;
                    spool.write_all(&chunk).await.map_err(field_error)?;
                }
                size = size.saturating_add(chunk.len());
            }

            spool.flush().await.map_err(field_error)?;

            Ok(UploadPart {
                file,
                file_name: field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(ToOwned::to_owned),
                size,
            })
        })
    }
}

impl UploadSource {
    /// 由表单解析器落盘的上传部分构造
    pub fn from_part(field_name: &str, part: &UploadPart) -> Self {
        Self {
            field_name: field_name.to_string(),
            original_name: part.file_name.clone().unwrap_or_default(),
            declared_size: part.size as u64,
            path: part.file.path().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
