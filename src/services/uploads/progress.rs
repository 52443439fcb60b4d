use std::sync::Arc;

use tracing::{debug, info};

use crate::models::ProgressUpdate;

/// 接收上传进度的能力
///
/// 每拷贝一个数据块调用一次 `report`，实现方可以把进度转发给日志、
/// 流式响应或 websocket。
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// 默认实现：写入日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, update: ProgressUpdate) {
        if update.is_complete() {
            info!("Done ({} bytes)", update.bytes_total);
        } else {
            debug!(
                "File upload still in progress -- {} / {}",
                update.bytes_read, update.bytes_total
            );
        }
    }
}

/// 单次上传的进度计数器
///
/// 累加每个数据块的长度，并把累计值推送给 reporter。
pub struct ProgressTracker {
    bytes_expected: u64,
    bytes_seen: u64,
    reporter: Arc<dyn ProgressReporter>,
    completed: bool,
}

impl ProgressTracker {
    pub fn new(bytes_expected: u64, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self {
            bytes_expected,
            bytes_seen: 0,
            reporter,
            completed: false,
        }
    }

    /// 记录一个已拷贝的数据块
    pub fn observe(&mut self, chunk_len: usize) {
        self.bytes_seen += chunk_len as u64;
        let update = self.snapshot();
        self.completed = update.is_complete();
        self.reporter.report(update);
    }

    /// 拷贝结束时调用；空文件不会产生数据块，这里补发最终进度
    pub fn finish(self) {
        if !self.completed {
            self.reporter.report(self.snapshot());
        }
    }

    pub fn bytes_seen(&self) -> u64 {
        self.bytes_seen
    }

    fn snapshot(&self) -> ProgressUpdate {
        ProgressUpdate {
            bytes_read: self.bytes_seen,
            bytes_total: self.bytes_expected,
        }
    }
}
