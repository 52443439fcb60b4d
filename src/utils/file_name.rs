use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::config::NamingStrategy;

static EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,16}$").expect("extension regex is valid"));

/// 从原始文件名中提取扩展名（不含点号）
///
/// 只接受字母、数字和下划线组成的扩展名，其余情况返回 `None`，
/// 避免客户端通过文件名影响存储路径。
pub fn file_extension(original_name: &str) -> Option<String> {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| EXTENSION_REGEX.is_match(ext))
        .map(|ext| ext.to_string())
}

/// 按命名方式生成存储键
pub fn storage_key(
    strategy: NamingStrategy,
    now: chrono::DateTime<chrono::Utc>,
    extension: Option<&str>,
) -> String {
    let stem = match strategy {
        NamingStrategy::Unique => format!("{}-{}", now.timestamp(), uuid::Uuid::new_v4().simple()),
        NamingStrategy::Timestamp => now.to_string(),
    };

    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}
