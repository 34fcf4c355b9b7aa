pub mod notifier;
pub mod types;

pub use notifier::{Notifier, TelegramNotifier};
pub use types::*;
