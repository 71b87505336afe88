use tracing::{info, instrument};

use crate::{
    error::DirectoryResult,
    model::{Employee, EmployeeGroup},
    provider::DirectoryProvider,
    query::DirectoryQuery,
    view::{FetchTicket, ListView, LoadOutcome, ViewChange},
};

/// Host view: the group list, the active group and its list view.
///
/// Group changes go through [`select_group`](Self::select_group),
/// [`fetch`](Self::fetch) and [`deliver`](Self::deliver) so callers can
/// interleave requests; only the latest ticket reaches the view.
#[derive(Debug)]
pub struct DirectorySession<P> {
    provider: P,
    groups: Vec<EmployeeGroup>,
    active_group: Option<i64>,
    view: ListView,
}

impl<P: DirectoryProvider> DirectorySession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            groups: Vec::new(),
            active_group: None,
            view: ListView::default(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn groups(&self) -> &[EmployeeGroup] {
        &self.groups
    }

    pub fn active_group(&self) -> Option<&EmployeeGroup> {
        let id = self.active_group?;
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn active_group_id(&self) -> Option<i64> {
        self.active_group
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Load the group list and make the first group active. A failure here
    /// is terminal for the attempt; the host offers a manual reload.
    #[instrument(name = "directory.session.load_groups", skip_all)]
    pub async fn load_groups(&mut self) -> DirectoryResult<&[EmployeeGroup]> {
        let groups = self.provider.groups().await?;
        info!(count = groups.len(), "employee groups loaded");
        self.active_group = groups.first().map(|group| group.id);
        self.groups = groups;
        Ok(&self.groups)
    }

    /// Mark `group_id` active and issue a fetch ticket for it. Search,
    /// filters and sort are kept.
    pub fn select_group(&mut self, group_id: i64) -> FetchTicket {
        self.active_group = Some(group_id);
        self.view.begin_load(Some(group_id))
    }

    /// Run the provider call for a ticket without touching the view.
    pub async fn fetch(&self, ticket: FetchTicket) -> DirectoryResult<Vec<Employee>> {
        self.provider.employees(ticket.group_id).await
    }

    pub fn deliver(
        &mut self,
        ticket: FetchTicket,
        result: DirectoryResult<Vec<Employee>>,
    ) -> LoadOutcome {
        self.view.complete_load(ticket, result)
    }

    #[instrument(name = "directory.session.open_group", skip(self))]
    pub async fn open_group(&mut self, group_id: i64) -> LoadOutcome {
        let ticket = self.select_group(group_id);
        let result = self.fetch(ticket).await;
        self.deliver(ticket, result)
    }

    /// Open the active group, if any.
    pub async fn open_active(&mut self) -> Option<LoadOutcome> {
        let group_id = self.active_group?;
        Some(self.open_group(group_id).await)
    }

    pub fn update_query(
        &mut self,
        f: impl FnOnce(&DirectoryQuery) -> DirectoryQuery,
    ) -> ViewChange {
        self.view.update(f)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.view.go_to_page(page)
    }
}
