//! Department and status filter sets.
//!
//! The state is a value: every toggle hands back a new [`FilterState`]
//! instead of mutating the current one.

use std::collections::BTreeSet;

use crate::model::{Employee, EmployeeStatus};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    departments: BTreeSet<String>,
    statuses: BTreeSet<EmployeeStatus>,
}

impl FilterState {
    pub fn new(
        departments: impl IntoIterator<Item = String>,
        statuses: impl IntoIterator<Item = EmployeeStatus>,
    ) -> Self {
        Self {
            departments: departments.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
        }
    }

    pub fn departments(&self) -> &BTreeSet<String> {
        &self.departments
    }

    pub fn statuses(&self) -> &BTreeSet<EmployeeStatus> {
        &self.statuses
    }

    pub fn toggle_department(&self, department: &str) -> Self {
        let mut next = self.clone();
        if !next.departments.remove(department) {
            next.departments.insert(department.to_string());
        }
        next
    }

    pub fn toggle_status(&self, status: EmployeeStatus) -> Self {
        let mut next = self.clone();
        if !next.statuses.remove(&status) {
            next.statuses.insert(status);
        }
        next
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.departments.is_empty() || !self.statuses.is_empty()
    }

    /// Number of selected values across both sets.
    pub fn active_count(&self) -> usize {
        self.departments.len() + self.statuses.len()
    }

    /// An empty set means no restriction.
    pub fn allows_department(&self, department: &str) -> bool {
        self.departments.is_empty() || self.departments.contains(department)
    }

    pub fn allows_status(&self, status: EmployeeStatus) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }
}

/// Distinct departments of the raw collection in first-seen order.
///
/// Computed from the unfiltered collection so a deselected department stays
/// selectable.
pub fn department_options(raw: &[Employee]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.iter()
        .filter(|employee| seen.insert(employee.department.as_str()))
        .map(|employee| employee.department.clone())
        .collect()
}

/// Fixed status choices with their labels, independent of the data.
pub fn status_options() -> [(EmployeeStatus, &'static str); 3] {
    EmployeeStatus::ALL.map(|status| (status, status.label()))
}
