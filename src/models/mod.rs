// 数据模型模块

pub mod request;
pub mod transfer;

pub use request::{DownloadRequest, ExpectedFile, FieldError};
pub use transfer::{DownloadedFile, FileOutcome, TransferReport, TransferStats};
