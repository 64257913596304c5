//! Filtering, sorting and bumping over a raw list of tag names.
//!
//! These functions take the tag list as data and perform no I/O; the git
//! layer supplies the raw names and persists any tag the caller decides to
//! create. Each invocation re-reads the full list, so two concurrent
//! processes can both observe the same latest tag and race on the bump.
//! That is accepted behavior, not something this layer locks against.

use crate::version::{BumpField, VersionTag};

/// Parse and filter a raw tag list down to the versions matching a
/// prefix/stage pair.
///
/// Tags that fail the prefix check or the version grammar are silently
/// dropped; foreign tags in the repository are expected and not an error.
/// Stage must match exactly, with both-absent counting as a match.
///
/// When `synthesize` is set and nothing matched, the result is a single
/// `0.0.0` baseline carrying the requested prefix and stage, so callers
/// always have a starting point to bump from. Callers that need to
/// distinguish "never tagged" from "tagged at zero" pass `synthesize =
/// false` and handle the empty set themselves.
///
/// The result order is unspecified; callers sort.
pub fn filter_tags(
    raw_tags: &[String],
    prefix: &str,
    stage: Option<&str>,
    synthesize: bool,
) -> Vec<VersionTag> {
    let mut tags: Vec<VersionTag> = raw_tags
        .iter()
        .filter_map(|line| VersionTag::parse(line.trim(), prefix).ok())
        .filter(|tag| tag.stage.as_deref() == stage)
        .collect();

    if tags.is_empty() && synthesize {
        tags.push(VersionTag::zero(prefix, stage));
    }

    tags
}

/// The highest version matching the prefix/stage pair, or `None` when the
/// filtered set is empty.
///
/// Synthesis makes the empty case unreachable in practice; the `Option` is
/// kept so the command layer owns the "no tags" message.
pub fn latest_tag(raw_tags: &[String], prefix: &str, stage: Option<&str>) -> Option<VersionTag> {
    let mut tags = filter_tags(raw_tags, prefix, stage, true);
    tags.sort_by(|a, b| b.cmp(a));
    tags.into_iter().next()
}

/// Compute the next version by bumping `field` on the latest matching tag.
pub fn bump_tag(
    raw_tags: &[String],
    prefix: &str,
    stage: Option<&str>,
    field: BumpField,
) -> Option<VersionTag> {
    latest_tag(raw_tags, prefix, stage).map(|latest| latest.bumped(field))
}

/// All versions matching the prefix/stage pair, sorted descending by
/// default or ascending when `reverse` is set.
pub fn list_tags(
    raw_tags: &[String],
    prefix: &str,
    stage: Option<&str>,
    reverse: bool,
) -> Option<Vec<VersionTag>> {
    let mut tags = filter_tags(raw_tags, prefix, stage, true);
    if tags.is_empty() {
        return None;
    }
    if reverse {
        tags.sort();
    } else {
        tags.sort_by(|a, b| b.cmp(a));
    }
    Some(tags)
}
