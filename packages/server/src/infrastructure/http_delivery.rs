//! HTTP を使った DeliveryConnector / DeliveryChannel 実装
//!
//! ## 責務
//!
//! - join 時に参加者の `GET /api/health` を呼び、到達可能かを確認する
//! - 参加者ごとに専用の `reqwest::Client` を持ち、`POST /api/receive` でイベントを配送する
//! - close 時に Client を破棄し、その参加者へのコネクションプールを解放する

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use chatrelay_shared::protocol::{ChatEventDto, HEALTH_PATH, RECEIVE_PATH};

use crate::domain::{
    ChatEvent, ConnectError, DeliveryChannel, DeliveryConnector, DeliveryError, EndpointAddress,
};

/// Opens HTTP delivery channels after probing the participant's health endpoint
pub struct HttpDeliveryConnector {
    connect_timeout: Duration,
}

impl HttpDeliveryConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl DeliveryConnector for HttpDeliveryConnector {
    async fn connect(
        &self,
        address: &EndpointAddress,
    ) -> Result<Arc<dyn DeliveryChannel>, ConnectError> {
        let connect_error = |reason: String| ConnectError {
            address: address.to_string(),
            reason,
        };

        let base_url = address.base_url();
        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| connect_error(e.to_string()))?;

        let response = client
            .get(format!("{}{}", base_url, HEALTH_PATH))
            .send()
            .await
            .map_err(|e| connect_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(connect_error(format!(
                "health check answered {}",
                response.status()
            )));
        }

        tracing::debug!("Opened delivery channel to {}", base_url);
        Ok(Arc::new(HttpDeliveryChannel::new(client, &base_url)))
    }
}

/// Delivery channel to one participant's receive endpoint
pub struct HttpDeliveryChannel {
    /// `None` once closed
    client: Mutex<Option<reqwest::Client>>,
    receive_url: String,
}

impl HttpDeliveryChannel {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client: Mutex::new(Some(client)),
            receive_url: format!("{}{}", base_url, RECEIVE_PATH),
        }
    }

    fn client(&self) -> Option<reqwest::Client> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DeliveryChannel for HttpDeliveryChannel {
    async fn deliver(&self, event: &ChatEvent) -> Result<(), DeliveryError> {
        let client = self.client().ok_or(DeliveryError::Closed)?;

        let response = client
            .post(&self.receive_url)
            .json(&ChatEventDto::from(event))
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected(status.as_u16()))
        }
    }

    fn close(&self) {
        let previous = self
            .client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!("Closed delivery channel to {}", self.receive_url);
        }
    }

    fn is_closed(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
