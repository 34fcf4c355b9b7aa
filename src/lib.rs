pub mod config;
pub mod modules;
pub mod services;
pub mod shutdown;

use std::sync::Arc;

use config::Config;
use services::monitor::PollLoop;
use services::practicum::PracticumClient;
use services::telegram::TelegramNotifier;

/// Wire the production Practicum client and Telegram notifier into a poll loop.
pub fn create_poll_loop(config: &Config) -> PollLoop {
    let source = Arc::new(PracticumClient::from_config(config));
    let notifier = Arc::new(TelegramNotifier::from_config(config));

    PollLoop::from_config(config, source, notifier)
}
