//! Notice sinks. The UI owns how notices are shown; the assistant only
//! raises them and never waits on the result.

use common::protocol::Notice;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, duration: Duration);
}

/// Writes notices to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str, duration: Duration) {
        info!("{}: {} ({}ms)", title, message, duration.as_millis());
    }
}

/// Forwards notices to a UI task.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, title: &str, message: &str, duration: Duration) {
        if self.tx.send(Notice::new(title, message, duration)).is_err() {
            debug!("Notice receiver dropped, discarding '{}'", title);
        }
    }
}
