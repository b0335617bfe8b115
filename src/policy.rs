//! Inclusion and listing policy for blocks and categories.
//!
//! Every predicate has the same shape: a non-empty exclude list wins, then a
//! non-empty allow list must contain the name, otherwise the answer is yes.
//! "Include" decides whether something exists in the manifest at all; "list"
//! decides whether it is user-facing. An unlisted block is still installable
//! as a dependency.

use crate::config::BuildConfig;

fn allowed(name: &str, allow: &[String], deny: &[String]) -> bool {
    if !deny.is_empty() && deny.iter().any(|n| n == name) {
        return false;
    }

    if !allow.is_empty() {
        return allow.iter().any(|n| n == name);
    }

    true
}

/// Should the block be built into the manifest?
pub fn should_include_block(name: &str, config: &BuildConfig) -> bool {
    allowed(name, &config.include_blocks, &config.exclude_blocks)
}

/// Should the block be shown to users?
pub fn should_list_block(name: &str, config: &BuildConfig) -> bool {
    allowed(name, &config.list_blocks, &config.do_not_list_blocks)
}

/// Should the category be built into the manifest?
pub fn should_include_category(name: &str, config: &BuildConfig) -> bool {
    allowed(name, &config.include_categories, &config.exclude_categories)
}

/// Should the category be shown to users?
pub fn should_list_category(name: &str, config: &BuildConfig) -> bool {
    allowed(
        name,
        &config.list_categories,
        &config.do_not_list_categories,
    )
}
