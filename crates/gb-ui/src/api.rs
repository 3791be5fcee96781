// api.rs — GoalApi: the calls the board makes against the server.
//
// The trait keeps the controller independent of transport. HttpGoalApi is
// the real implementation over blocking reqwest; tests drive the
// controller with an in-memory implementation instead.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use gb_goal::{Goal, GoalId};

use crate::error::ClientError;

/// Server the client talks to when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Goal route base used by the client.
pub const API_BASE: &str = "/api/goals";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The goal API as seen from the board.
pub trait GoalApi {
    fn list(&self) -> Result<Vec<Goal>, ClientError>;

    fn create(&self, title: &str) -> Result<Goal, ClientError>;

    fn update(&self, id: GoalId, title: &str) -> Result<Goal, ClientError>;

    /// Returns the server's confirmation message.
    fn delete(&self, id: GoalId) -> Result<String, ClientError>;

    fn greet(&self) -> Result<String, ClientError>;
}

#[derive(Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// GoalApi over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGoalApi {
    client: Client,
    server_url: String,
}

impl HttpGoalApi {
    /// Client for the server at `server_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn goals_url(&self) -> String {
        format!("{}{}", self.server_url, API_BASE)
    }

    fn goal_url(&self, id: GoalId) -> String {
        format!("{}{}/{}", self.server_url, API_BASE, id)
    }
}

impl GoalApi for HttpGoalApi {
    fn list(&self) -> Result<Vec<Goal>, ClientError> {
        let response = self.client.get(self.goals_url()).send()?;
        read_json(response, "Failed to load goals")
    }

    fn create(&self, title: &str) -> Result<Goal, ClientError> {
        let response = self
            .client
            .post(self.goals_url())
            .json(&TitleBody { title })
            .send()?;
        read_json(response, "Create failed")
    }

    fn update(&self, id: GoalId, title: &str) -> Result<Goal, ClientError> {
        let response = self
            .client
            .put(self.goal_url(id))
            .json(&TitleBody { title })
            .send()?;
        read_json(response, "Update failed")
    }

    fn delete(&self, id: GoalId) -> Result<String, ClientError> {
        let response = self.client.delete(self.goal_url(id)).send()?;
        let body: MessageBody = read_json(response, "Delete failed")?;
        Ok(body.message)
    }

    fn greet(&self) -> Result<String, ClientError> {
        let url = format!("{}/api/greet", self.server_url);
        let response = self.client.get(url).send()?;
        let body: MessageBody = read_json(response, "Greeting failed")?;
        Ok(body.message)
    }
}

/// Decode a success body, or turn a failure into `ClientError::Api` using
/// the server's `{"error": ...}` message when it sent one.
fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let message = response
        .json::<ErrorBody>()
        .map(|body| body.error)
        .unwrap_or_else(|_| fallback.to_string());
    tracing::debug!(%status, %message, "goal API call failed");
    Err(ClientError::Api(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_trimmed_server() {
        let api = HttpGoalApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.server_url(), "http://localhost:3000");
        assert_eq!(api.goals_url(), "http://localhost:3000/api/goals");
        assert_eq!(api.goal_url(42), "http://localhost:3000/api/goals/42");
    }
}
