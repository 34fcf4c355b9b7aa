pub mod client;
pub mod error;
pub mod validator;

pub use client::{PracticumClient, StatusSource};
pub use error::ApiError;
pub use validator::validate;
