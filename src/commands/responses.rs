//! Reply text formatting.
//!
//! Every user-visible reply the plugin can produce lives here, one formatting
//! function per reply, so the handlers never build strings inline.

/// Confirmation that a group was added to the welcome whitelist.
pub fn format_added(group_id: &str) -> String {
    format!("已添加群组 {} 到欢迎列表", group_id)
}

/// Confirmation that a group was removed from the welcome whitelist.
pub fn format_removed(group_id: &str) -> String {
    format!("已从欢迎列表中删除群组 {}", group_id)
}

/// Notice that the group to add is already whitelisted.
pub fn format_already_present() -> String {
    "该群组已在欢迎列表中".to_owned()
}

/// Notice that the group to remove is not whitelisted.
pub fn format_not_present() -> String {
    "该群组不在欢迎列表中".to_owned()
}

/// Prompt for the missing argument of an add command.
pub fn format_missing_add_argument() -> String {
    "请提供要添加的群号".to_owned()
}

/// Prompt for the missing argument of a remove command.
pub fn format_missing_remove_argument() -> String {
    "请提供要删除的群号".to_owned()
}
