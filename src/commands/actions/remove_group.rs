//! Remove-group command handler.
//!
//! The exact inverse of the add handler: removes a group id from the welcome
//! whitelist and persists the updated configuration before acknowledging.

use log::debug;

use crate::{
    commands::responses::{format_not_present, format_removed},
    config::WelcomeConfig,
    store::ConfigStore,
};

/// Removes a group id from the welcome whitelist.
///
/// If the group is not whitelisted, nothing is mutated or persisted and the
/// reply says so. Otherwise the id is removed, the configuration is flushed
/// through the store, and the reply confirms the removal.
///
/// # Errors
///
/// A failed persistence write reinserts the id at its previous position and
/// propagates the error; the caller's error boundary logs it and suppresses
/// any reply.
pub async fn handle_remove_group<S: ConfigStore>(
    config: &mut WelcomeConfig,
    store: &S,
    group_id: &str,
) -> anyhow::Result<String> {
    let Some(position) = config.welcome_groups.iter().position(|g| g == group_id) else {
        debug!("group {} not in the welcome whitelist", group_id);
        return Ok(format_not_present());
    };

    config.welcome_groups.remove(position);

    if let Err(e) = store.save(config).await {
        // Keep memory and disk consistent
        config.welcome_groups.insert(position, group_id.to_owned());
        return Err(e);
    }

    debug!("removed group {} from the welcome whitelist", group_id);

    Ok(format_removed(group_id))
}
