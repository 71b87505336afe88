//! The list transform pipeline.
//!
//! `derive` runs search, department filter, status filter and sort in that
//! order; `paginate` slices the result. Both are pure: the raw collection is
//! only read.

use crate::{filter::FilterState, model::Employee, query::DirectoryQuery};

/// Case-insensitive substring match on name, email, position and
/// department. An empty term matches everything.
pub fn matches_search(employee: &Employee, term: &str) -> bool {
    term.is_empty() || matches_lowered(employee, &term.to_lowercase())
}

pub fn matches_filters(employee: &Employee, filters: &FilterState) -> bool {
    filters.allows_department(&employee.department) && filters.allows_status(employee.status)
}

/// Stages 1-4: search, department filter, status filter, stable sort.
pub fn derive(raw: &[Employee], query: &DirectoryQuery) -> Vec<Employee> {
    let needle = query.search().to_lowercase();
    let mut result: Vec<Employee> = raw
        .iter()
        .filter(|employee| needle.is_empty() || matches_lowered(employee, &needle))
        .filter(|employee| matches_filters(employee, query.filters()))
        .cloned()
        .collect();

    let sort = query.sort();
    // slice::sort_by is stable, so ties keep the filtered order.
    result.sort_by(|a, b| sort.compare(a, b));
    result
}

fn matches_lowered(employee: &Employee, needle: &str) -> bool {
    [
        &employee.name,
        &employee.email,
        &employee.position,
        &employee.department,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Stage 5: the `[(page-1)*per_page, page*per_page)` window, clamped to the
/// sequence. Page 0 or a page past the end yields an empty slice.
pub fn paginate(derived: &[Employee], page: usize, per_page: usize) -> &[Employee] {
    let Some(first) = page.checked_sub(1).map(|p| p * per_page) else {
        return &[];
    };
    let start = first.min(derived.len());
    let end = first.saturating_add(per_page).min(derived.len());
    &derived[start..end]
}
