pub mod uploads;

pub use uploads::entities::{StoredFile, UploadSource};
pub use uploads::progress::ProgressUpdate;
pub use uploads::requests::{
    MULTIPLE_FIELD, MultipleUploadForm, SINGLE_FIELD, SingleUploadForm, UploadPart,
};

/// 上传成功时返回给客户端的文本
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File upload successfull";

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
