pub mod model;
pub mod verdict;

pub use model::{ApiResponse, HomeworkEntry, PollState};
pub use verdict::{translate, TranslateError};
