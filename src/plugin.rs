//! The welcome plugin: command dispatch and join notification.
//!
//! [`WelcomePlugin`] is the single logical component of the bot. It exposes
//! two entry points, one per event category the host delivers:
//!
//! 1. **Command dispatcher** ([`WelcomePlugin::handle_group_message`]) -
//!    receives every group text message and executes the `add_group` /
//!    `remove_group` admin commands for monitored groups.
//! 2. **Join notifier** ([`WelcomePlugin::handle_notice`]) - receives every
//!    raw event and composes a greeting when a new member joins a
//!    whitelisted group.
//!
//! # Error Handling
//!
//! Neither entry point ever propagates an error to the host's event loop:
//! each wraps its processing in an error boundary that logs the failure and
//! degrades to "no visible response". Malformed events are ignored without
//! logging noise; only explicit validation failures (missing command
//! argument, duplicate/absent group id) produce a worded reply.
//!
//! # State
//!
//! The plugin exclusively owns its [`WelcomeConfig`] for the process
//! lifetime. Mutations go through the command handlers, which flush the
//! snapshot to the injected [`ConfigStore`] before acknowledging.

use log::{error, info};
use serde_json::Value;

use crate::{
    commands::{
        Command, format_command_error,
        actions::{handle_add_group, handle_remove_group},
    },
    config::WelcomeConfig,
    events::{GroupMessage, Notice},
    segments::{OutboundMessage, Segment},
    store::ConfigStore,
};

/// The group-welcome plugin instance.
///
/// Generic over the [`ConfigStore`] so tests can inject a mock and count
/// persistence writes.
pub struct WelcomePlugin<S: ConfigStore> {
    /// The owned configuration snapshot, mirrored into the store on mutation.
    config: WelcomeConfig,
    /// Write-through persistence for the configuration.
    store: S,
}

impl<S: ConfigStore> WelcomePlugin<S> {
    /// Creates a plugin instance from its initial configuration and store.
    pub fn new(config: WelcomeConfig, store: S) -> Self {
        WelcomePlugin { config, store }
    }

    /// Handles a group text message, executing admin commands.
    ///
    /// Returns the replies to send back into the originating group: at most
    /// one message. Messages from unmonitored groups, non-command chatter,
    /// and internal failures all produce an empty vec.
    ///
    /// # Processing
    ///
    /// 1. Ignore messages without text or from groups outside
    ///    `monitor_groups`.
    /// 2. Parse the first whitespace token as a command; silently ignore
    ///    anything unrecognized, prompt for a missing group-id argument.
    /// 3. Delegate to the add/remove handler, which validates membership,
    ///    mutates, persists write-through, and words the acknowledgment.
    ///
    /// Errors are logged and swallowed; the host never sees them.
    pub async fn handle_group_message(&mut self, message: &GroupMessage) -> Vec<OutboundMessage> {
        match self.process_group_message(message).await {
            Ok(replies) => replies,
            Err(e) => {
                error!("failed to process group message: {:?}", e);
                Vec::new()
            }
        }
    }

    async fn process_group_message(
        &mut self,
        message: &GroupMessage,
    ) -> anyhow::Result<Vec<OutboundMessage>> {
        if message.text.trim().is_empty()
            || !self.config.monitor_groups.contains(&message.group_id)
        {
            return Ok(Vec::new());
        }

        info!("group message received: {}", message.raw);

        let reply = match Command::parse(&message.text) {
            Ok(Command::AddGroup(group_id)) => {
                handle_add_group(&mut self.config, &self.store, &group_id).await?
            }
            Ok(Command::RemoveGroup(group_id)) => {
                handle_remove_group(&mut self.config, &self.store, &group_id).await?
            }
            Err(e) => match format_command_error(&e) {
                Some(prompt) => prompt,
                // Not an admin command, stay silent
                None => return Ok(Vec::new()),
            },
        };

        Ok(vec![OutboundMessage::plain(message.group_id.clone(), reply)])
    }

    /// Handles a raw platform event, greeting new members of whitelisted
    /// groups.
    ///
    /// Returns the greeting to send, or `None` when the event is not a
    /// member-joined notice, the welcome feature is disabled, the group is
    /// not whitelisted, or processing fails. The greeting is an ordered
    /// segment sequence: when `is_at` is enabled and the notice carries the
    /// joining user id, a mention and a separating space precede the welcome
    /// text.
    pub fn handle_notice(&self, event: &Value) -> Option<OutboundMessage> {
        match self.process_notice(event) {
            Ok(greeting) => greeting,
            Err(e) => {
                error!("failed to process notice event: {:?}", e);
                None
            }
        }
    }

    fn process_notice(&self, event: &Value) -> anyhow::Result<Option<OutboundMessage>> {
        let Notice::GroupIncrease { group_id, user_id } = Notice::decode(event) else {
            return Ok(None);
        };

        if !self.config.is_send_welcome {
            return Ok(None);
        }

        if !self.config.welcome_groups.contains(&group_id) {
            return Ok(None);
        }

        let mut segments = Vec::new();

        if self.config.is_at {
            if let Some(user_id) = user_id {
                segments.push(Segment::at(user_id));
                segments.push(Segment::text(" "));
            }
        }

        segments.push(Segment::text(self.config.welcome_text.clone()));

        info!("welcoming new member in group {}", group_id);

        Ok(Some(OutboundMessage { group_id, segments }))
    }
}
