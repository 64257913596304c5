//! Command implementations for the CLI subcommands.
//!
//! Each function maps one subcommand onto the tag queries and the
//! [TagStore] collaborator and returns the single line printed to stdout.
//! The "no matching tag" messages are informational rather than fatal; the
//! process still exits successfully after printing them.

use crate::config::Config;
use crate::error::Result;
use crate::git::TagStore;
use crate::tags;
use crate::ui;
use crate::version::BumpField;

pub const NO_MATCHING_TAG: &str =
    "ERROR: No matching tag has been found. Please create 1st SemVer tag i.e. 'git tag 0.0.1'";
pub const NO_TAGS_FOUND: &str =
    "ERROR: No tags has been found. Please create 1st SemVer tag i.e. 'git tag 0.0.1'";

/// `semvertag latest`
pub fn latest(store: &dyn TagStore, prefix: &str, stage: Option<&str>) -> Result<String> {
    let raw = store.list_tag_names()?;
    Ok(match tags::latest_tag(&raw, prefix, stage) {
        Some(ver) => ver.to_string(),
        None => NO_MATCHING_TAG.to_string(),
    })
}

/// `semvertag bump`
///
/// Computes the bumped version; with `create` set it also tags the current
/// HEAD with the rendered string and pushes it to the configured remote.
pub fn bump(
    store: &dyn TagStore,
    config: &Config,
    prefix: &str,
    stage: Option<&str>,
    field: BumpField,
    create: bool,
) -> Result<String> {
    let raw = store.list_tag_names()?;
    let ver = match tags::bump_tag(&raw, prefix, stage, field) {
        Some(ver) => ver,
        None => return Ok(NO_MATCHING_TAG.to_string()),
    };

    let rendered = ver.to_string();
    if create {
        ui::display_status(&format!("Tagging HEAD with {}", rendered));
        store.create_tag(&rendered, &config.defaults.message)?;
        store.push_tag(&config.defaults.remote, &rendered)?;
        ui::display_success(&format!(
            "Pushed tag {} to {}",
            rendered, config.defaults.remote
        ));
    }
    Ok(rendered)
}

/// `semvertag tag`
///
/// Assigns the literal string verbatim, bypassing all parsing, and echoes
/// it back.
pub fn tag(store: &dyn TagStore, config: &Config, name: &str) -> Result<String> {
    store.create_tag(name, &config.defaults.message)?;
    store.push_tag(&config.defaults.remote, name)?;
    ui::display_success(&format!("Pushed tag {} to {}", name, config.defaults.remote));
    Ok(name.to_string())
}

/// `semvertag list`
pub fn list(
    store: &dyn TagStore,
    prefix: &str,
    stage: Option<&str>,
    reverse: bool,
    csv: bool,
) -> Result<String> {
    let raw = store.list_tag_names()?;
    Ok(match tags::list_tags(&raw, prefix, stage, reverse) {
        Some(matched) => {
            let delimiter = if csv { "," } else { "\n" };
            matched
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(delimiter)
        }
        None => NO_TAGS_FOUND.to_string(),
    })
}
