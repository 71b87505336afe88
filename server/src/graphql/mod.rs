mod payload;

use async_graphql::{Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema};
use platform_api::{ApiError, ApiResult};
use products_directory::{
    DirectoryProvider, DirectoryQuery, EmployeeStatus, FilterState, ListView, LoadOutcome,
    LoadState, SortDirection, SortField, SortSpec, StaticDirectory,
};
use serde::Serialize;
use tracing::instrument;

pub use payload::{
    EmployeePayload, EmployeeViewInput, EmployeeViewPayload, FilterPayload, GroupPayload,
    PaginationPayload,
};

pub type SchemaType = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(provider: StaticDirectory) -> SchemaType {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(provider)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> async_graphql::Result<HealthPayload> {
        Ok(HealthPayload { ok: true })
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> async_graphql::Result<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    #[instrument(name = "graphql.groups", skip_all)]
    async fn groups(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GroupPayload>> {
        let groups = load_groups(ctx).await.map_err(|err| err.extend())?;
        Ok(groups)
    }

    #[instrument(name = "graphql.group", skip(self, ctx))]
    async fn group(&self, ctx: &Context<'_>, id: i64) -> async_graphql::Result<GroupPayload> {
        let groups = load_groups(ctx).await.map_err(|err| err.extend())?;
        groups
            .into_iter()
            .find(|group| group.id == id)
            .ok_or_else(|| ApiError::not_found(format!("employee group {id}")).extend())
    }

    /// One derived page of a group's employees. A missing or unknown group
    /// id lists everyone.
    #[instrument(name = "graphql.employee_view", skip(self, ctx, input))]
    async fn employee_view(
        &self,
        ctx: &Context<'_>,
        group_id: Option<i64>,
        input: Option<EmployeeViewInput>,
    ) -> async_graphql::Result<EmployeeViewPayload> {
        employee_view(ctx, group_id, input.unwrap_or_default())
            .await
            .map_err(|err| err.extend())
    }
}

async fn load_groups(ctx: &Context<'_>) -> ApiResult<Vec<GroupPayload>> {
    let provider = provider(ctx)?;
    let groups = provider.groups().await.map_err(ApiError::upstream)?;
    Ok(groups.into_iter().map(GroupPayload::from).collect())
}

async fn employee_view(
    ctx: &Context<'_>,
    group_id: Option<i64>,
    input: EmployeeViewInput,
) -> ApiResult<EmployeeViewPayload> {
    let query = query_from_input(&input)?;
    let provider = provider(ctx)?;

    let mut view = ListView::new(query);
    let ticket = view.begin_load(group_id);
    let result = provider.employees(group_id).await;
    if view.complete_load(ticket, result) == LoadOutcome::Failed {
        let message = match view.state() {
            LoadState::Failed(message) => message.clone(),
            _ => "failed to load employee data".to_string(),
        };
        return Err(ApiError::Upstream(message));
    }

    let requested = input.page.unwrap_or(1);
    let requested = usize::try_from(requested)
        .map_err(|_| ApiError::invalid(format!("page {requested} out of range")))?;
    if requested != 1 && !view.go_to_page(requested) {
        return Err(ApiError::invalid(format!(
            "page {requested} out of range (1..={})",
            view.pagination().total_pages()
        )));
    }

    let page = view.page();
    let sort = view.query().sort();
    Ok(EmployeeViewPayload {
        items: page.items.iter().map(EmployeePayload::from).collect(),
        total_matches: page.total_matches as u64,
        no_results: page.no_results(),
        sort_field: sort.field.as_str().to_string(),
        sort_direction: sort.direction.as_str().to_string(),
        pagination: PaginationPayload::from(page.pagination),
        filters: FilterPayload::new(view.department_options(), view.query().filters()),
    })
}

fn query_from_input(input: &EmployeeViewInput) -> ApiResult<DirectoryQuery> {
    let statuses = input
        .statuses
        .iter()
        .flatten()
        .map(|raw| raw.parse::<EmployeeStatus>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::invalid)?;
    let filters = FilterState::new(input.departments.iter().flatten().cloned(), statuses);

    let field = match input.sort_field.as_deref() {
        Some(raw) => raw.parse::<SortField>().map_err(ApiError::invalid)?,
        None => SortField::Name,
    };
    let direction = match input.sort_direction.as_deref() {
        Some(raw) => raw.parse::<SortDirection>().map_err(ApiError::invalid)?,
        None => SortDirection::Asc,
    };

    Ok(DirectoryQuery::default()
        .with_search(input.search.clone().unwrap_or_default())
        .with_filters(filters)
        .with_sort(SortSpec::new(field, direction)))
}

fn provider<'a>(ctx: &Context<'a>) -> ApiResult<&'a StaticDirectory> {
    ctx.data::<StaticDirectory>().map_err(|err| {
        ApiError::internal(anyhow::anyhow!(
            "directory provider missing: {}",
            err.message
        ))
    })
}

#[derive(Clone, Debug, async_graphql::SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}
