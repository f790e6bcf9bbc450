pub mod upload;

pub use upload::{UploadBatchCommand, UploadBatchError};
