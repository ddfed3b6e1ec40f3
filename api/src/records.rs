//! Farm records — the data-fetch/submit contract for everything that is not
//! identity. The dashboard and the two record screens consume these; the
//! shapes are the minimum the widgets render, not a faithful model of the
//! backend's schema.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{protected_error, Gateway};
use crate::error::GatewayError;
use crate::types::SubjectId;

/// A farm project (a field, an orchard, a herd...).
#[derive(Clone, Debug, Deserialize)]
pub struct ProjectInfo {
    pub id: SubjectId,
    pub name: String,
    #[serde(default, alias = "project_type")]
    pub kind: Option<String>,
}

/// Payload for creating a project.
#[derive(Clone, Debug, Serialize)]
pub struct NewProject {
    pub name: String,
    pub project_type: String,
}

/// A planting event inside a project.
#[derive(Clone, Debug, Deserialize)]
pub struct PlantingEvent {
    pub id: SubjectId,
    #[serde(default, alias = "crop_name")]
    pub crop: Option<String>,
    #[serde(default)]
    pub planted_at: Option<String>,
}

/// An animal group inside a project.
#[derive(Clone, Debug, Deserialize)]
pub struct AnimalGroup {
    pub id: SubjectId,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

impl Gateway {
    pub async fn list_projects(&self, token: &str) -> Result<Vec<ProjectInfo>, GatewayError> {
        let resp = self.get_authed("/projects/", token).await?;
        parse_list(resp).await
    }

    pub async fn create_project(
        &self,
        token: &str,
        project: &NewProject,
    ) -> Result<ProjectInfo, GatewayError> {
        let resp = self.post_authed("/projects/", token, project).await?;
        parse_one(resp).await
    }

    pub async fn list_planting_events(
        &self,
        token: &str,
        project_id: &str,
    ) -> Result<Vec<PlantingEvent>, GatewayError> {
        let resp = self
            .get_authed(&format!("/projects/{project_id}/planting-event"), token)
            .await?;
        parse_list(resp).await
    }

    pub async fn create_planting_event(
        &self,
        token: &str,
        project_id: &str,
        crop: &str,
    ) -> Result<PlantingEvent, GatewayError> {
        let resp = self
            .post_authed(
                &format!("/projects/{project_id}/planting-event"),
                token,
                &json!({ "crop_name": crop }),
            )
            .await?;
        parse_one(resp).await
    }

    pub async fn list_animal_groups(
        &self,
        token: &str,
        project_id: &str,
    ) -> Result<Vec<AnimalGroup>, GatewayError> {
        let resp = self
            .get_authed(&format!("/project/{project_id}/animal-group/"), token)
            .await?;
        parse_list(resp).await
    }

    pub async fn create_animal_group(
        &self,
        token: &str,
        project_id: &str,
        species: &str,
        count: u32,
    ) -> Result<AnimalGroup, GatewayError> {
        let resp = self
            .post_authed(
                &format!("/project/{project_id}/animal-group/"),
                token,
                &json!({ "species": species, "count": count }),
            )
            .await?;
        parse_one(resp).await
    }
}

async fn parse_list<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Vec<T>, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        resp.json()
            .await
            .map_err(|e| GatewayError::Unexpected(e.to_string()))
    } else {
        Err(protected_error(status))
    }
}

async fn parse_one<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        resp.json()
            .await
            .map_err(|e| GatewayError::Unexpected(e.to_string()))
    } else {
        Err(protected_error(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_tolerates_alias_and_missing_kind() {
        let p: ProjectInfo =
            serde_json::from_str(r#"{"id": 3, "name": "North Field", "project_type": "plant"}"#)
                .unwrap();
        assert_eq!(p.id.as_string(), "3");
        assert_eq!(p.kind.as_deref(), Some("plant"));

        let p: ProjectInfo = serde_json::from_str(r#"{"id": "abc", "name": "Barn"}"#).unwrap();
        assert_eq!(p.id.as_string(), "abc");
        assert!(p.kind.is_none());
    }
}
