pub mod create;

pub use create::{CreateProjectCommand, CreateProjectError};
