pub mod get_upload;
pub mod project_users;
pub mod user_uploads;

pub use get_upload::{GetUploadError, GetUploadQuery};
pub use project_users::ProjectUsersError;
pub use user_uploads::UserUploadsError;
