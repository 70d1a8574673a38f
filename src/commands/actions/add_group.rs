//! Add-group command handler.
//!
//! Appends a group id to the welcome whitelist and persists the updated
//! configuration before acknowledging.

use log::debug;

use crate::{
    commands::responses::{format_added, format_already_present},
    config::WelcomeConfig,
    store::ConfigStore,
};

/// Adds a group id to the welcome whitelist.
///
/// If the group is already whitelisted, nothing is mutated or persisted and
/// the reply says so. Otherwise the id is appended, the configuration is
/// flushed through the store, and the reply confirms the addition.
///
/// # Errors
///
/// A failed persistence write rolls the in-memory mutation back and
/// propagates the error; the caller's error boundary logs it and suppresses
/// any reply.
pub async fn handle_add_group<S: ConfigStore>(
    config: &mut WelcomeConfig,
    store: &S,
    group_id: &str,
) -> anyhow::Result<String> {
    if config.welcome_groups.iter().any(|g| g == group_id) {
        debug!("group {} already in the welcome whitelist", group_id);
        return Ok(format_already_present());
    }

    config.welcome_groups.push(group_id.to_owned());

    if let Err(e) = store.save(config).await {
        // Keep memory and disk consistent
        config.welcome_groups.pop();
        return Err(e);
    }

    debug!("added group {} to the welcome whitelist", group_id);

    Ok(format_added(group_id))
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use crate::store::MockConfigStore;

    use super::*;

    fn create_test_config() -> WelcomeConfig {
        WelcomeConfig {
            welcome_groups: vec!["100".to_owned()],
            ..WelcomeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_add_new_group_persists_once() {
        let mut config = create_test_config();
        let mut store = MockConfigStore::new();
        store
            .expect_save()
            .withf(|config: &WelcomeConfig| {
                config.welcome_groups == vec!["100".to_owned(), "200".to_owned()]
            })
            .times(1)
            .returning(|_| Ok(()));

        let reply = handle_add_group(&mut config, &store, "200").await.unwrap();

        assert_eq!(reply, "已添加群组 200 到欢迎列表");
        assert_eq!(
            config.welcome_groups,
            vec!["100".to_owned(), "200".to_owned()]
        );
    }

    #[tokio::test]
    async fn test_add_existing_group_is_a_no_op() {
        let mut config = create_test_config();
        let mut store = MockConfigStore::new();
        store.expect_save().times(0);

        let reply = handle_add_group(&mut config, &store, "100").await.unwrap();

        assert_eq!(reply, "该群组已在欢迎列表中");
        assert_eq!(config.welcome_groups, vec!["100".to_owned()]);
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back() {
        let mut config = create_test_config();
        let mut store = MockConfigStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(anyhow!("disk full")));

        let result = handle_add_group(&mut config, &store, "200").await;

        assert!(result.is_err());
        assert_eq!(config.welcome_groups, vec!["100".to_owned()]);
    }
}
