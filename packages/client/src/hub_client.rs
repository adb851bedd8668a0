//! HTTP client for the hub API.

use chatrelay_shared::protocol::{
    ChatEventDto, ErrorResponse, HISTORY_PATH, HistoryResponse, JOIN_PATH, JoinRequest,
    PARTICIPANTS_PATH, ParticipantsResponse, SEND_PATH, SendRequest, SendResponse,
};
use reqwest::Response;

use crate::error::ClientError;

/// Thin wrapper around the hub's JSON endpoints
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// # Arguments
    ///
    /// * `hub_url` - Base URL of the hub (e.g., "http://127.0.0.1:9000")
    pub fn new(hub_url: impl Into<String>) -> Self {
        let hub_url = hub_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: hub_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the hub and return the full history, own join notice included
    ///
    /// # Errors
    ///
    /// * `ClientError::Join` - the hub rejected the request (bad argument or
    ///   unreachable endpoint)
    /// * `ClientError::Http` - the hub itself could not be reached
    pub async fn join(
        &self,
        identity: &str,
        endpoint_address: &str,
    ) -> Result<Vec<ChatEventDto>, ClientError> {
        let response = self
            .http
            .post(self.url(JOIN_PATH))
            .json(&JoinRequest {
                identity: identity.to_string(),
                endpoint_address: endpoint_address.to_string(),
            })
            .send()
            .await?;

        if response.status().is_success() {
            let body: HistoryResponse = response.json().await?;
            return Ok(body.history);
        }
        Err(Self::rejection(response).await)
    }

    pub async fn history(&self) -> Result<Vec<ChatEventDto>, ClientError> {
        let body: HistoryResponse = self
            .http
            .get(self.url(HISTORY_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.history)
    }

    pub async fn send(&self, identity: &str, text: &str) -> Result<bool, ClientError> {
        let body: SendResponse = self
            .http
            .post(self.url(SEND_PATH))
            .json(&SendRequest {
                identity: identity.to_string(),
                text: text.to_string(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.ok)
    }

    /// Identities currently registered at the hub
    pub async fn participants(&self) -> Result<Vec<String>, ClientError> {
        let body: ParticipantsResponse = self
            .http
            .get(self.url(PARTICIPANTS_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.participants)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn rejection(response: Response) -> ClientError {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(error) => ClientError::Join {
                kind: error.kind,
                message: error.message,
            },
            Err(_) => ClientError::Connection(format!("hub answered {}", status)),
        }
    }
}
