use std::{future::Future, time::Duration};

use tracing::instrument;

use crate::{
    error::DirectoryResult,
    model::{Employee, EmployeeGroup},
    seed,
};

/// Source of groups and group members.
pub trait DirectoryProvider: Send + Sync {
    fn groups(&self) -> impl Future<Output = DirectoryResult<Vec<EmployeeGroup>>> + Send;

    /// Members of `group_id`, or the whole collection when the id is absent
    /// or not recognized by the provider.
    fn employees(
        &self,
        group_id: Option<i64>,
    ) -> impl Future<Output = DirectoryResult<Vec<Employee>>> + Send;
}

/// In-memory provider over the demo seed with optional simulated latency.
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    groups_latency: Duration,
    employees_latency: Duration,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, groups: Duration, employees: Duration) -> Self {
        self.groups_latency = groups;
        self.employees_latency = employees;
        self
    }
}

impl DirectoryProvider for StaticDirectory {
    #[instrument(name = "directory.static.groups", skip_all)]
    async fn groups(&self) -> DirectoryResult<Vec<EmployeeGroup>> {
        if !self.groups_latency.is_zero() {
            tokio::time::sleep(self.groups_latency).await;
        }
        Ok(seed::groups())
    }

    #[instrument(name = "directory.static.employees", skip(self))]
    async fn employees(&self, group_id: Option<i64>) -> DirectoryResult<Vec<Employee>> {
        if !self.employees_latency.is_zero() {
            tokio::time::sleep(self.employees_latency).await;
        }
        Ok(seed::employees_in_group(group_id))
    }
}
