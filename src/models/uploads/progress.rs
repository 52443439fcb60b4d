use serde::Serialize;

/// 一次进度上报
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub bytes_read: u64,
    pub bytes_total: u64,
}

impl ProgressUpdate {
    pub fn is_complete(&self) -> bool {
        self.bytes_read == self.bytes_total
    }
}
