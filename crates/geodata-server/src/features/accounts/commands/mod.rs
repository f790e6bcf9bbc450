pub mod create_user;
pub mod delete_user;
pub mod login;
pub mod refresh;

pub use create_user::{CreateUserCommand, CreateUserError};
pub use delete_user::{DeleteUserCommand, DeleteUserError};
pub use login::{LoginCommand, LoginError, TokenResponse};
pub use refresh::{RefreshCommand, RefreshError};
