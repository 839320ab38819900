//! Project operations.

use reqwest::Method;
use serde::Serialize;

use crate::{Client, Project, Response, Result};

/// Service for projects and the inboxes they group.
pub struct ProjectsService<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct ProjectPayload<'n> {
    project: ProjectName<'n>,
}

#[derive(Serialize)]
struct ProjectName<'n> {
    name: &'n str,
}

impl<'n> ProjectPayload<'n> {
    fn new(name: &'n str) -> Self {
        Self {
            project: ProjectName { name },
        }
    }
}

impl<'a> ProjectsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists projects and their inboxes.
    pub async fn list(&self, account_id: u64) -> Result<(Vec<Project>, Response)> {
        let path = format!("/accounts/{account_id}/projects");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Gets a project and its inboxes.
    pub async fn get(&self, account_id: u64, project_id: u64) -> Result<(Project, Response)> {
        let path = format!("/accounts/{account_id}/projects/{project_id}");
        self.client.fetch_json(Method::GET, &path, None::<&()>).await
    }

    /// Creates a project.
    pub async fn create(&self, account_id: u64, name: &str) -> Result<(Project, Response)> {
        let path = format!("/accounts/{account_id}/projects");
        self.client
            .fetch_json(Method::POST, &path, Some(&ProjectPayload::new(name)))
            .await
    }

    /// Renames a project.
    pub async fn update(&self, account_id: u64, project_id: u64, name: &str) -> Result<(Project, Response)> {
        let path = format!("/accounts/{account_id}/projects/{project_id}");
        self.client
            .fetch_json(Method::PATCH, &path, Some(&ProjectPayload::new(name)))
            .await
    }

    /// Deletes a project together with its inboxes.
    pub async fn delete(&self, account_id: u64, project_id: u64) -> Result<Response> {
        let path = format!("/accounts/{account_id}/projects/{project_id}");
        self.client
            .fetch_empty(Method::DELETE, &path, None::<&()>)
            .await
    }
}
