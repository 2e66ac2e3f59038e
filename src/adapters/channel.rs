use crossbeam_channel::{Receiver, Sender, unbounded};
use rollcall_core::RosterEvent;
use rollcall_core::ports::ChangeListener;
use tracing::warn;

/// Forwards roster events into a channel so the UI loop can drain them
/// between key presses
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: Sender<RosterEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, Receiver<RosterEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl ChangeListener for ChannelListener {
    fn notify(&self, event: &RosterEvent) {
        if self.sender.send(event.clone()).is_err() {
            warn!("Event receiver dropped, discarding {:?}", event);
        }
    }
}
