use async_graphql::{InputObject, SimpleObject};
use products_directory::{Employee, EmployeeGroup, FilterState, Pagination, filter};

#[derive(Clone, Debug, SimpleObject)]
pub struct GroupPayload {
    pub id: i64,
    pub name: String,
    pub count: u32,
}

impl From<EmployeeGroup> for GroupPayload {
    fn from(group: EmployeeGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            count: group.count,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct EmployeePayload {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub team: String,
    pub join_date: String,
    pub status: String,
    pub status_label: String,
}

impl From<&Employee> for EmployeePayload {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            team: employee.team.clone(),
            join_date: employee.join_date_display(),
            status: employee.status.as_str().to_string(),
            status_label: employee.status.label().to_string(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct PaginationPayload {
    pub current_page: u64,
    pub total_pages: u64,
    pub per_page: u64,
    pub visible: bool,
    pub page_range: Vec<u64>,
    pub first_item: Option<u64>,
    pub last_item: Option<u64>,
}

impl From<Pagination> for PaginationPayload {
    fn from(pagination: Pagination) -> Self {
        let range = pagination.visible_range();
        Self {
            current_page: pagination.current_page as u64,
            total_pages: pagination.total_pages() as u64,
            per_page: pagination.per_page as u64,
            visible: pagination.is_visible(),
            page_range: pagination
                .page_range()
                .into_iter()
                .map(|page| page as u64)
                .collect(),
            first_item: range.map(|(first, _)| first as u64),
            last_item: range.map(|(_, last)| last as u64),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct StatusOptionPayload {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct FilterPayload {
    pub departments: Vec<String>,
    pub selected_departments: Vec<String>,
    pub statuses: Vec<StatusOptionPayload>,
    pub active_count: u64,
}

impl FilterPayload {
    pub fn new(department_options: Vec<String>, state: &FilterState) -> Self {
        let statuses = filter::status_options()
            .into_iter()
            .map(|(status, label)| StatusOptionPayload {
                value: status.as_str().to_string(),
                label: label.to_string(),
                selected: state.statuses().contains(&status),
            })
            .collect();
        Self {
            departments: department_options,
            selected_departments: state.departments().iter().cloned().collect(),
            statuses,
            active_count: state.active_count() as u64,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct EmployeeViewPayload {
    pub items: Vec<EmployeePayload>,
    pub total_matches: u64,
    pub no_results: bool,
    pub sort_field: String,
    pub sort_direction: String,
    pub pagination: PaginationPayload,
    pub filters: FilterPayload,
}

/// Control parameters for `employeeView`. Omitted fields use the list
/// defaults: no search, no filters, name ascending, page 1.
#[derive(Clone, Debug, Default, InputObject)]
pub struct EmployeeViewInput {
    pub search: Option<String>,
    pub departments: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    pub page: Option<u64>,
}
