//! Command handler implementations.
//!
//! Each handler validates membership, applies the mutation to the in-memory
//! [`crate::config::WelcomeConfig`], persists it write-through, and returns
//! the reply text. No-op paths (duplicate add, absent remove) perform no
//! persistence write.

mod add_group;
mod remove_group;

pub use add_group::handle_add_group;
pub use remove_group::handle_remove_group;
