use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    error::{DirectoryError, DirectoryResult, Resource},
    model::{Employee, EmployeeGroup},
    provider::DirectoryProvider,
};

pub const GROUPS_PATH: &str = "api/employee-groups";
pub const EMPLOYEES_PATH: &str = "api/employees";

/// Provider backed by the directory HTTP endpoints.
#[derive(Clone, Debug)]
pub struct HttpDirectory {
    client: Client,
    base_url: Url,
}

impl HttpDirectory {
    pub fn new(base_url: &str) -> DirectoryResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> DirectoryResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        query: &[(&str, String)],
    ) -> DirectoryResult<T> {
        let url = self.base_url.join(path)?;
        let transport = |source| DirectoryError::Transport { resource, source };
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                resource,
                status: status.as_u16(),
            });
        }
        debug!(%status, path, "provider responded");
        response.json::<T>().await.map_err(transport)
    }
}

impl DirectoryProvider for HttpDirectory {
    #[instrument(name = "directory.http.groups", skip_all, fields(base = %self.base_url))]
    async fn groups(&self) -> DirectoryResult<Vec<EmployeeGroup>> {
        self.get_json(Resource::Groups, GROUPS_PATH, &[]).await
    }

    #[instrument(name = "directory.http.employees", skip(self), fields(base = %self.base_url))]
    async fn employees(&self, group_id: Option<i64>) -> DirectoryResult<Vec<Employee>> {
        let query: Vec<(&str, String)> = group_id
            .map(|id| ("groupId", id.to_string()))
            .into_iter()
            .collect();
        self.get_json(Resource::Employees, EMPLOYEES_PATH, &query)
            .await
    }
}
