pub mod uploads;

pub use uploads::UploadService;
pub use uploads::progress::{ProgressReporter, ProgressTracker, TracingProgress};
