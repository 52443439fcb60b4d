//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及对应的 HTTP 状态码。

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_upload_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum UploadError {
            $($variant(String),)*
        }

        impl UploadError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(UploadError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(UploadError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(UploadError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(UploadError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl UploadError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        UploadError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_upload_errors! {
    FormParse("E001", "Form Parse Error", INTERNAL_SERVER_ERROR),
    FieldMissing("E002", "Field Missing Error", INTERNAL_SERVER_ERROR),
    SizeLimitExceeded("E003", "Size Limit Exceeded", BAD_REQUEST),
    LocalFileCreate("E004", "Local File Create Error", INTERNAL_SERVER_ERROR),
    CopyIo("E005", "Copy IO Error", INTERNAL_SERVER_ERROR),
    FileOperation("E006", "File Operation Error", INTERNAL_SERVER_ERROR),
    Config("E007", "Configuration Error", INTERNAL_SERVER_ERROR),
}

impl UploadError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于客户端错误 (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UploadError {}

/// 错误直接作为纯文本响应返回给客户端，正文只包含错误详情
impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status())
            .insert_header(ContentType::plaintext())
            .body(self.message().to_string())
    }
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for UploadError {
    fn from(err: config::ConfigError) -> Self {
        UploadError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
