//! Terminal host for the directory: loads groups, opens one, applies the
//! requested controls and renders the visible page.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use products_directory::{
    DirectoryProvider, DirectorySession, EmployeeStatus, FilterState, ListView, LoadOutcome, LoadState,
    SortDirection, SortField, SortSpec, filter,
};
use tracing::info;

#[derive(Clone, Debug)]
pub struct BrowseOptions {
    pub group: Option<i64>,
    pub search: Option<String>,
    pub departments: Vec<String>,
    pub statuses: Vec<EmployeeStatus>,
    pub sort: SortField,
    pub descending: bool,
    pub page: usize,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            group: None,
            search: None,
            departments: Vec::new(),
            statuses: Vec::new(),
            sort: SortField::Name,
            descending: false,
            page: 1,
        }
    }
}

/// Drive a session through the options and return the rendered screen.
pub async fn browse<P: DirectoryProvider>(
    session: &mut DirectorySession<P>,
    options: &BrowseOptions,
) -> Result<String> {
    session
        .load_groups()
        .await
        .context("could not load employee groups; run the command again to retry")?;

    let outcome = match options.group {
        Some(group_id) => session.open_group(group_id).await,
        None => match session.open_active().await {
            Some(outcome) => outcome,
            None => bail!("no employee groups available"),
        },
    };
    if outcome == LoadOutcome::Failed {
        if let LoadState::Failed(message) = session.view().state() {
            bail!("{message}; select a group again to retry");
        }
    }

    let direction = if options.descending {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let filters = FilterState::new(
        options.departments.iter().cloned(),
        options.statuses.iter().copied(),
    );
    session.update_query(|query| {
        query
            .with_search(options.search.clone().unwrap_or_default())
            .with_filters(filters)
            .with_sort(SortSpec::new(options.sort, direction))
    });

    if options.page != 1 && !session.go_to_page(options.page) {
        let total = session.view().pagination().total_pages();
        bail!("page {} does not exist (1..={total})", options.page);
    }
    info!(
        group = ?session.active_group_id(),
        page = options.page,
        matches = session.view().derived().len(),
        "rendering directory page"
    );

    let mut out = String::new();
    render_groups(&mut out, session);
    render_view(&mut out, session.view());
    Ok(out)
}

fn render_groups<P>(out: &mut String, session: &DirectorySession<P>)
where
    P: DirectoryProvider,
{
    let active = session.active_group_id();
    let _ = writeln!(out, "그룹");
    for group in session.groups() {
        let marker = if Some(group.id) == active { '▸' } else { ' ' };
        let _ = writeln!(out, "{marker} {} ({})", group.name, group.count);
    }
    let _ = writeln!(out);
}

pub fn render_view(out: &mut String, view: &ListView) {
    let page = view.page();
    let query = view.query();
    let _ = writeln!(out, "직원 목록 (총 {}명)", page.total_matches);
    if !query.search().is_empty() {
        let _ = writeln!(out, "검색: {}", query.search());
    }

    let filters = query.filters();
    if filters.is_active() {
        let departments: Vec<&str> = filters.departments().iter().map(String::as_str).collect();
        let statuses: Vec<&str> = filter::status_options()
            .into_iter()
            .filter(|(status, _)| filters.statuses().contains(status))
            .map(|(_, label)| label)
            .collect();
        let _ = writeln!(
            out,
            "필터 {}: 부서 [{}] 상태 [{}]",
            filters.active_count(),
            departments.join(", "),
            statuses.join(", ")
        );
    }
    let _ = writeln!(out, "부서 선택지: {}", view.department_options().join(", "));
    let _ = writeln!(out);

    let sort = query.sort();
    let header = [
        (SortField::Name, "이름"),
        (SortField::Position, "직책"),
        (SortField::Department, "부서"),
        (SortField::Status, "상태"),
        (SortField::JoinDate, "입사일"),
    ]
    .map(|(field, title)| {
        if field == sort.field {
            format!("{title} {}", sort.direction.arrow())
        } else {
            title.to_string()
        }
    });
    let _ = writeln!(out, "{}", header.join(" | "));

    if page.no_results() {
        let _ = writeln!(out, "검색 결과가 없습니다.");
    }
    for employee in page.items {
        let _ = writeln!(
            out,
            "({}) {} <{}> | {} | {} / {} | {} | {}",
            employee.initial().unwrap_or('?'),
            employee.name,
            employee.email,
            employee.position,
            employee.department,
            employee.team,
            employee.status.label(),
            employee.join_date_display()
        );
    }

    let pagination = page.pagination;
    if pagination.is_visible() {
        let _ = writeln!(out);
        if let Some((first, last)) = pagination.visible_range() {
            let _ = write!(
                out,
                "전체 {}명 중 {first}-{last}명 표시  ",
                pagination.total_items
            );
        }
        let pages: Vec<String> = pagination
            .page_range()
            .into_iter()
            .map(|p| {
                if p == pagination.current_page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        let prev = if pagination.previous().is_some() { "‹" } else { " " };
        let next = if pagination.next().is_some() { "›" } else { " " };
        let _ = writeln!(out, "{prev} {} {next}", pages.join(" "));
    }
}
