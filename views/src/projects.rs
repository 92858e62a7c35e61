//! Derived views of the projects page.
//!
//! Every function here is pure: the input slice is never mutated and nothing
//! is cached between calls. Callers recompute on each new snapshot and on
//! each filter or sort change.

use chrono::{DateTime, Utc};
use shared_types::{Project, ProjectsView, SortKey, StatusCount, StatusFilter};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Keep the projects matching `filter` and order them by `sort_key`.
///
/// Records with an unrecognized status only survive the `all` filter.
pub fn filter_and_sort(projects: &[Project], filter: StatusFilter, sort_key: SortKey) -> Vec<Project> {
    let mut filtered: Vec<Project> = projects
        .iter()
        .filter(|project| matches_filter(project, filter))
        .cloned()
        .collect();

    // sort_by is stable, equal keys keep their snapshot order
    match sort_key {
        SortKey::Name => filtered.sort_by(|a, b| compare_names(&a.project_name, &b.project_name)),
        SortKey::Date => filtered.sort_by(|a, b| created_at(b).cmp(&created_at(a))),
        SortKey::Budget => filtered.sort_by(|a, b| b.budget.total_cmp(&a.budget)),
        SortKey::Priority => filtered.sort_by(|a, b| priority_rank(b).cmp(&priority_rank(a))),
    }

    filtered
}

/// Number of projects with the given status, or all of them for `StatusFilter::All`
pub fn count_by_status(projects: &[Project], filter: StatusFilter) -> usize {
    match filter {
        StatusFilter::All => projects.len(),
        StatusFilter::Only(_) => projects
            .iter()
            .filter(|project| matches_filter(project, filter))
            .count(),
    }
}

/// Sum of every budget.
///
/// Plain f64 addition: very large collections of very large budgets can lose
/// precision. Good enough for display.
pub fn total_budget(projects: &[Project]) -> f64 {
    projects.iter().map(|project| project.budget).sum()
}

/// Projects in planning or in progress
pub fn active_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|project| project.status().map(|s| s.is_active()).unwrap_or(false))
        .count()
}

/// Projects whose status is outside the known set
pub fn unrecognized_count(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|project| project.status().is_err())
        .count()
}

/// Everything the projects page shows for one filter and sort selection
pub fn derive_view(projects: &[Project], filter: StatusFilter, sort_key: SortKey) -> ProjectsView {
    let unrecognized = unrecognized_count(projects);
    if unrecognized > 0 {
        tracing::warn!(
            "{} project(s) have an unrecognized status and are excluded from status counts",
            unrecognized
        );
    }

    let status_counts = StatusFilter::options()
        .into_iter()
        .map(|option| StatusCount {
            key: option.as_str().to_string(),
            label: option.label().to_string(),
            count: count_by_status(projects, option),
        })
        .collect();

    ProjectsView {
        projects: filter_and_sort(projects, filter, sort_key),
        total: projects.len(),
        status_counts,
        total_budget: total_budget(projects),
        active_count: active_count(projects),
        unrecognized_count: unrecognized,
    }
}

fn matches_filter(project: &Project, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Only(wanted) => project.status().map(|s| s == wanted).unwrap_or(false),
    }
}

/// Locale-style collation in three levels: base letters, then accents,
/// then case with lowercase before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| decomposed_lowercase(a).cmp(&decomposed_lowercase(b)))
        .then_with(|| b.cmp(a))
}

/// Case-folded letters with accents stripped: "Éclair" becomes "eclair"
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercased NFD form; an accented letter sorts after its bare form
fn decomposed_lowercase(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

/// Unparseable timestamps map to None and so sort after every real date
fn created_at(project: &Project) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&project.created_at)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Unrecognized priorities rank below `low`
fn priority_rank(project: &Project) -> u8 {
    project.priority().map(|p| p.rank()).unwrap_or(0)
}
