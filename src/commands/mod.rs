//! Admin command parsing and handling.
//!
//! Messages from monitored groups are scanned for two administrative
//! commands that maintain the welcome whitelist:
//!
//! | Command | Synonym | Arguments | Effect |
//! |---------|---------|-----------|--------|
//! | `add_group` | `添加欢迎群` | `<group_id>` | add the group to the welcome whitelist |
//! | `remove_group` | `删除欢迎群` | `<group_id>` | remove the group from the welcome whitelist |
//!
//! # Processing flow
//!
//! ```text
//! Group message → Command::parse → AddGroup/RemoveGroup
//!                                       │
//!                                       ▼
//!                        handle_add_group / handle_remove_group
//!                                       │
//!                          mutate → persist → worded reply
//! ```
//!
//! Matching is exact and case-sensitive on the first whitespace-delimited
//! token; everything that is not a recognized command is ignored silently.
//! Only explicit validation failures (missing argument, duplicate/absent
//! group id) produce a worded reply.
//!
//! # Module Organization
//!
//! - [`command`] - Command enum and whitespace tokenizing parser
//! - [`actions`] - The add/remove handlers with write-through persistence
//! - [`responses`] - Reply text formatting

pub mod actions;
pub mod command;
pub mod responses;

pub use command::{Command, CommandParsingError, format_command_error};
