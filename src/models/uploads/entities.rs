use serde::Serialize;
use std::path::PathBuf;

/// 上传成功后落盘的文件
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    // 存储目录内的文件名，作为存储键
    pub storage_key: String,
    // 文件完整路径
    pub path: PathBuf,
    // 客户端提交的原始文件名，只作为元数据保留
    pub original_name: String,
    // 扩展名（不含点号），可能为空
    pub extension: String,
    // 实际写入的字节数
    pub size: u64,
    // 存储时间
    pub stored_at: chrono::DateTime<chrono::Utc>,
}

/// 一个待存储的上传部分
#[derive(Debug, Clone)]
pub struct UploadSource {
    // 表单字段名
    pub field_name: String,
    // 原始文件名
    pub original_name: String,
    // 声明大小
    pub declared_size: u64,
    // 表单解析器落盘的临时文件
    pub path: PathBuf,
}
