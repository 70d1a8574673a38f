//! Host harness wiring the plugin to an event stream.
//!
//! The platform transport is host-provided: this module only adapts a
//! line-delimited JSON event stream to the plugin. Events arrive on stdin,
//! one OneBot v11 event per line; every outbound message leaves on stdout as
//! a `send_group_msg` action, one per line:
//!
//! ```json
//! {"action":"send_group_msg","params":{"group_id":"100","message":[{"type":"text","data":{"text":"欢迎新成员加入！"}}]}}
//! ```
//!
//! # Event routing
//!
//! Every event is offered to the join notifier (which filters for
//! member-joined notices itself); events that are group text messages are
//! additionally routed to the command dispatcher. Lines that are not valid
//! JSON are logged and skipped; they never stop the loop.

use log::{error, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{
    events::GroupMessage, plugin::WelcomePlugin, segments::OutboundMessage, store::ConfigStore,
};

/// The bot event loop, owning the plugin instance.
pub struct Bot<S: ConfigStore> {
    plugin: WelcomePlugin<S>,
}

impl<S: ConfigStore> Bot<S> {
    /// Creates a bot around a plugin instance.
    pub fn new(plugin: WelcomePlugin<S>) -> Self {
        Bot { plugin }
    }

    /// Runs the event loop until the input stream closes.
    ///
    /// Reads one JSON event per line from stdin, dispatches it into the
    /// plugin, and writes the resulting actions to stdout. All per-event
    /// failures (bad JSON, processing errors, write errors) are logged and
    /// the loop continues; a single bad event can never crash the bot.
    pub async fn start(mut self) {
        info!("listening for events on stdin");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }

            let event: Value = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(e) => {
                    warn!("skipping malformed event line: {}", e);
                    continue;
                }
            };

            for message in dispatch(&mut self.plugin, &event).await {
                send(&mut stdout, &message).await;
            }
        }

        info!("event stream closed, shutting down");
    }
}

/// Routes one raw event through both plugin entry points.
async fn dispatch<S: ConfigStore>(
    plugin: &mut WelcomePlugin<S>,
    event: &Value,
) -> Vec<OutboundMessage> {
    let mut outbound = Vec::new();

    // The join notifier sees every event and filters for itself
    if let Some(greeting) = plugin.handle_notice(event) {
        outbound.push(greeting);
    }

    // The command dispatcher only sees group text messages
    if let Some(message) = GroupMessage::from_event(event) {
        outbound.extend(plugin.handle_group_message(&message).await);
    }

    outbound
}

/// Converts an outbound message into a OneBot `send_group_msg` action.
fn to_action(message: &OutboundMessage) -> Value {
    json!({
        "action": "send_group_msg",
        "params": {
            "group_id": message.group_id,
            "message": message.segments,
        }
    })
}

/// Writes one action line to the output stream. Errors are logged, not
/// propagated; the host side of the pipe inspects nothing.
async fn send<W: AsyncWriteExt + Unpin>(writer: &mut W, message: &OutboundMessage) {
    let mut line = match serde_json::to_vec(&to_action(message)) {
        Ok(serialized) => serialized,
        Err(e) => {
            error!("failed to serialize outbound action: {}", e);
            return;
        }
    };
    line.push(b'\n');

    if let Err(e) = writer.write_all(&line).await {
        error!("failed to write outbound action: {}", e);
        return;
    }
    if let Err(e) = writer.flush().await {
        error!("failed to flush outbound action: {}", e);
    }
}
