//! End-to-end tests: a real hub and real participant endpoints on ephemeral ports.

use std::{sync::Arc, time::Duration};

use chatrelay_client::{ClientError, HubClient, inbound::InboundEndpoint};
use chatrelay_server::{
    config::HubConfig, hub::Hub, infrastructure::HttpDeliveryConnector, ui::Server,
};
use chatrelay_shared::{
    protocol::{ChatEventDto, ErrorKind},
    time::SystemClock,
};
use tokio::{
    net::TcpListener,
    sync::mpsc::{self, UnboundedReceiver},
};

const EVENT_TIMEOUT: Duration = Duration::from_secs(3);

async fn spawn_hub() -> HubClient {
    let config = HubConfig {
        delivery_timeout: Duration::from_secs(1),
        connect_timeout: Duration::from_secs(1),
        ..HubConfig::default()
    };
    let connector = Arc::new(HttpDeliveryConnector::new(config.connect_timeout));
    let (hub, _engine) = Hub::start(&config, connector, Arc::new(SystemClock));
    let router = Server::new(hub).router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    HubClient::new(format!("http://{}", address))
}

struct Participant {
    endpoint: InboundEndpoint,
    events: UnboundedReceiver<ChatEventDto>,
}

impl Participant {
    async fn spawn() -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let endpoint = InboundEndpoint::spawn("127.0.0.1:0", tx).await.unwrap();
        Self { endpoint, events }
    }

    fn address(&self) -> String {
        self.endpoint.local_addr().to_string()
    }

    async fn next_event(&mut self) -> ChatEventDto {
        tokio::time::timeout(EVENT_TIMEOUT, self.events.recv())
            .await
            .expect("no event within timeout")
            .expect("event channel closed")
    }

    fn assert_no_event(&mut self) {
        assert!(
            self.events.try_recv().is_err(),
            "unexpected event delivered"
        );
    }
}

async fn wait_for_participants(hub: &HubClient, expected: &[&str]) {
    for _ in 0..100 {
        if hub.participants().await.unwrap() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "participants never became {:?}, last seen {:?}",
        expected,
        hub.participants().await.unwrap()
    );
}

fn texts(history: &[ChatEventDto]) -> Vec<(&str, &str)> {
    history
        .iter()
        .map(|event| (event.sender_identity.as_str(), event.text.as_str()))
        .collect()
}

#[tokio::test]
async fn test_alice_and_bob_exchange_messages() {
    // テスト項目: alice と bob が join し、bob のメッセージが alice にだけ届く
    // given (前提条件):
    let hub = spawn_hub().await;
    let mut alice = Participant::spawn().await;
    let mut bob = Participant::spawn().await;

    // when (操作):
    let alice_history = hub.join("alice", &alice.address()).await.unwrap();
    let bob_history = hub.join("bob", &bob.address()).await.unwrap();
    let notice = alice.next_event().await;
    let ok = hub.send("bob", "hi").await.unwrap();
    let message = alice.next_event().await;

    // then (期待する結果):
    assert_eq!(texts(&alice_history), vec![("SERVER", "User alice joined")]);
    assert_eq!(
        texts(&bob_history),
        vec![("SERVER", "User alice joined"), ("SERVER", "User bob joined")]
    );
    assert_eq!(notice.sender_identity, "SERVER");
    assert_eq!(notice.text, "User bob joined");
    assert!(ok);
    assert_eq!(message.sender_identity, "bob");
    assert_eq!(message.text, "hi");
    alice.assert_no_event();
    bob.assert_no_event();

    let history = hub.history().await.unwrap();
    assert_eq!(
        texts(&history),
        vec![
            ("SERVER", "User alice joined"),
            ("SERVER", "User bob joined"),
            ("bob", "hi"),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_participant_is_rejected() {
    // テスト項目: 到達できない endpoint での join は ConnectionError になり、何も記録されない
    // given (前提条件):
    let hub = spawn_hub().await;
    let mut alice = Participant::spawn().await;
    hub.join("alice", &alice.address()).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_address = listener.local_addr().unwrap().to_string();
    drop(listener);

    // when (操作):
    let result = hub.join("carol", &dead_address).await;

    // then (期待する結果):
    match result {
        Err(ClientError::Join { kind, message }) => {
            assert_eq!(kind, ErrorKind::ConnectionError);
            assert!(message.contains(&dead_address));
        }
        other => panic!("expected connection error, got {:?}", other),
    }
    assert_eq!(hub.history().await.unwrap().len(), 1);
    assert_eq!(hub.participants().await.unwrap(), vec!["alice"]);
    alice.assert_no_event();
}

#[tokio::test]
async fn test_join_with_empty_identity_is_invalid_argument() {
    // テスト項目: 空の identity での join は InvalidArgument になる
    // given (前提条件):
    let hub = spawn_hub().await;
    let participant = Participant::spawn().await;

    // when (操作):
    let result = hub.join("", &participant.address()).await;

    // then (期待する結果):
    assert!(matches!(
        result,
        Err(ClientError::Join {
            kind: ErrorKind::InvalidArgument,
            ..
        })
    ));
    assert!(hub.history().await.unwrap().is_empty());
    assert!(hub.participants().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_participant_is_pruned() {
    // テスト項目: 配送に失敗した参加者は削除され、送信者にはエラーが返らない
    // given (前提条件):
    let hub = spawn_hub().await;
    let mut alice = Participant::spawn().await;
    let bob = Participant::spawn().await;
    hub.join("alice", &alice.address()).await.unwrap();
    hub.join("bob", &bob.address()).await.unwrap();
    assert_eq!(alice.next_event().await.text, "User bob joined");
    let Participant {
        endpoint: _bob_endpoint,
        events: bob_events,
    } = bob;
    drop(bob_events);

    // when (操作):
    let ok = hub.send("alice", "ping").await.unwrap();

    // then (期待する結果):
    assert!(ok);
    wait_for_participants(&hub, &["alice"]).await;
    alice.assert_no_event();
    let history = hub.history().await.unwrap();
    assert_eq!(history.last().unwrap().text, "ping");
}

#[tokio::test]
async fn test_rejoin_moves_delivery_to_new_endpoint() {
    // テスト項目: 同じ identity で再 join すると、以降の配送は新しい endpoint にだけ届く
    // given (前提条件):
    let hub = spawn_hub().await;
    let mut old_alice = Participant::spawn().await;
    let mut new_alice = Participant::spawn().await;
    let bob = Participant::spawn().await;
    hub.join("alice", &old_alice.address()).await.unwrap();
    hub.join("alice", &new_alice.address()).await.unwrap();
    hub.join("bob", &bob.address()).await.unwrap();

    // when (操作):
    hub.send("bob", "hello again").await.unwrap();

    // then (期待する結果):
    assert_eq!(new_alice.next_event().await.text, "User bob joined");
    assert_eq!(new_alice.next_event().await.text, "hello again");
    old_alice.assert_no_event();
    assert_eq!(hub.participants().await.unwrap(), vec!["alice", "bob"]);
}
