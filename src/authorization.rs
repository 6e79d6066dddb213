//! Derivation of submit rights from group memberships.
//!
//! Submitter groups are named `<org>-<system>-<project>-submitters`, e.g.
//! `opnfv-gerrit-functest-submitters`. The project is the third dash-separated
//! field.

/// Project list granted when authentication is disabled: anyone may submit.
pub const ANONYMOUS_PROJECT: &str = "anonymous";

/// Substring that marks a group as a submitter group.
pub const SUBMITTER_MARKER: &str = "-submitters";

const PROJECT_FIELD: usize = 2;

/// Projects the holder of `groups` may submit results to, in group order.
///
/// Groups without [`SUBMITTER_MARKER`] are ignored. A marked group with fewer
/// than three dash-separated fields names no project and is skipped.
pub fn submitter_projects<S: AsRef<str>>(groups: &[S]) -> Vec<String> {
    groups
        .iter()
        .map(AsRef::as_ref)
        .filter(|group| group.contains(SUBMITTER_MARKER))
        .filter_map(|group| group.split('-').nth(PROJECT_FIELD))
        .map(str::to_string)
        .collect()
}
