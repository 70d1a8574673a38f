//! Command parsing.
//!
//! Converts the plain-text body of a group message into a structured
//! [`Command`]. Tokenization is plain whitespace splitting; the first token
//! selects the command and the second is its group-id argument. Extra tokens
//! are ignored.

use log::debug;

use crate::commands::responses::{format_missing_add_argument, format_missing_remove_argument};

/// A parsed administrative command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a group id to the welcome whitelist.
    AddGroup(String),
    /// Remove a group id from the welcome whitelist.
    RemoveGroup(String),
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The message is not an administrative command at all.
    NotACommand,
    /// An add command without its group-id argument.
    MissingAddArgument,
    /// A remove command without its group-id argument.
    MissingRemoveArgument,
}

impl Command {
    /// Parses a message body into a [`Command`].
    ///
    /// The first whitespace-delimited token must match one of the command
    /// literals exactly (case-sensitive): `add_group` / `添加欢迎群` for the
    /// add command, `remove_group` / `删除欢迎群` for the remove command.
    ///
    /// # Errors
    ///
    /// * [`CommandParsingError::NotACommand`] - First token is not a command
    ///   literal (or the message is empty). Produces no reply.
    /// * [`CommandParsingError::MissingAddArgument`] /
    ///   [`CommandParsingError::MissingRemoveArgument`] - Recognized command
    ///   without a group id. Produces a prompt reply.
    pub fn parse(body: &str) -> Result<Self, CommandParsingError> {
        let mut tokens = body.split_whitespace();

        let command = match tokens.next() {
            Some("add_group") | Some("添加欢迎群") => match tokens.next() {
                Some(group_id) => Command::AddGroup(group_id.to_owned()),
                None => return Err(CommandParsingError::MissingAddArgument),
            },
            Some("remove_group") | Some("删除欢迎群") => match tokens.next() {
                Some(group_id) => Command::RemoveGroup(group_id.to_owned()),
                None => return Err(CommandParsingError::MissingRemoveArgument),
            },
            _ => return Err(CommandParsingError::NotACommand),
        };

        debug!("parsed command: {:?}", command);

        Ok(command)
    }
}

/// Formats a parsing error into a reply, when the error warrants one.
///
/// # Returns
///
/// * `Some(String)` - A prompt for the missing group-id argument
/// * `None` - The message was not a command; stay silent
pub fn format_command_error(error: &CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::MissingAddArgument => Some(format_missing_add_argument()),
        CommandParsingError::MissingRemoveArgument => Some(format_missing_remove_argument()),
        CommandParsingError::NotACommand => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_group() {
        let result = Command::parse("add_group 200");
        assert_eq!(result, Ok(Command::AddGroup("200".to_owned())));
    }

    #[test]
    fn test_parse_add_group_localized() {
        let result = Command::parse("添加欢迎群 200");
        assert_eq!(result, Ok(Command::AddGroup("200".to_owned())));
    }

    #[test]
    fn test_parse_remove_group() {
        let result = Command::parse("remove_group 200");
        assert_eq!(result, Ok(Command::RemoveGroup("200".to_owned())));
    }

    #[test]
    fn test_parse_remove_group_localized() {
        let result = Command::parse("删除欢迎群 200");
        assert_eq!(result, Ok(Command::RemoveGroup("200".to_owned())));
    }

    #[test]
    fn test_parse_add_group_missing_argument() {
        let result = Command::parse("add_group");
        assert_eq!(result, Err(CommandParsingError::MissingAddArgument));
    }

    #[test]
    fn test_parse_remove_group_missing_argument() {
        let result = Command::parse("删除欢迎群");
        assert_eq!(result, Err(CommandParsingError::MissingRemoveArgument));
    }

    #[test]
    fn test_parse_extra_tokens_ignored() {
        let result = Command::parse("add_group 200 please now");
        assert_eq!(result, Ok(Command::AddGroup("200".to_owned())));
    }

    #[test]
    fn test_parse_leading_whitespace() {
        let result = Command::parse("   add_group 200");
        assert_eq!(result, Ok(Command::AddGroup("200".to_owned())));
    }

    #[test]
    fn test_parse_ordinary_message() {
        let result = Command::parse("hello everyone");
        assert_eq!(result, Err(CommandParsingError::NotACommand));
    }

    #[test]
    fn test_parse_empty_message() {
        let result = Command::parse("");
        assert_eq!(result, Err(CommandParsingError::NotACommand));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let result = Command::parse("Add_Group 200");
        assert_eq!(result, Err(CommandParsingError::NotACommand));
    }

    #[test]
    fn test_parse_command_must_be_first_token() {
        let result = Command::parse("please add_group 200");
        assert_eq!(result, Err(CommandParsingError::NotACommand));
    }

    #[test]
    fn test_format_command_error_missing_add_argument() {
        let message = format_command_error(&CommandParsingError::MissingAddArgument);
        assert_eq!(message.unwrap(), "请提供要添加的群号");
    }

    #[test]
    fn test_format_command_error_missing_remove_argument() {
        let message = format_command_error(&CommandParsingError::MissingRemoveArgument);
        assert_eq!(message.unwrap(), "请提供要删除的群号");
    }

    #[test]
    fn test_format_command_error_not_a_command() {
        assert!(format_command_error(&CommandParsingError::NotACommand).is_none());
    }
}
