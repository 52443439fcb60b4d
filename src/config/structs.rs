use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub upload: UploadConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,                // 上传目录
    pub max_file_size: usize,       // 单文件最大字节数
    pub memory_limit: usize,        // 非文件表单字段的内存缓冲上限
    pub max_request_size: usize,    // 整个 multipart 请求体上限
    pub naming: NamingStrategy,     // 存储文件命名方式
    pub rollback_on_failure: bool,  // 批量上传失败时是否删除本批次已写入的文件
    pub index_file: String,         // 首页 HTML 文件
    pub progress_chunk_size: usize, // 拷贝缓冲区大小，每个块上报一次进度
}

/// 存储文件命名方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    /// `<unix 时间戳>-<uuid>.<扩展名>`
    Unique,
    /// `<UTC 时间字符串>.<扩展名>`，同一时刻的同扩展名文件会互相覆盖
    Timestamp,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            max_file_size: 10 * 1024 * 1024,
            memory_limit: 10 * 1024 * 1024,
            max_request_size: 100 * 1024 * 1024,
            naming: NamingStrategy::Unique,
            rollback_on_failure: false,
            index_file: "index.html".to_string(),
            progress_chunk_size: 64 * 1024,
        }
    }
}
