//! Gateway Integration Tests
//!
//! Connects the real gateway client to the fake platform's WebSocket, drives
//! pins through dispatch frames and exercises reconnect, resume and shutdown.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::*;
use pinbot_gateway::protocol::CloseCode;
use pinbot_gateway::{GatewayClient, GatewayConfig};
use serde_json::json;
use tokio::sync::oneshot;

async fn connect(platform: &FakePlatform) -> (TestBot, tokio::task::JoinHandle<()>) {
    let bot = TestBot::new(platform).unwrap();
    let client = GatewayClient::new(GatewayConfig::from(&bot.config.bot), bot.pipeline.clone());
    let handle = tokio::spawn(async move {
        let _ = client.run().await;
    });

    platform
        .wait_for(|world| !world.identifies.is_empty())
        .await
        .expect("client should identify");

    (bot, handle)
}

#[tokio::test]
async fn test_identify_carries_token_and_intents() {
    let platform = FakePlatform::start().await.unwrap();
    let (_bot, handle) = connect(&platform).await;

    let identify = platform.inspect(|w| w.identifies[0].clone());
    assert_eq!(identify["token"], BOT_TOKEN);
    // GUILDS | GUILD_MESSAGES | GUILD_MESSAGE_REACTIONS
    assert_eq!(identify["intents"], 1537);

    handle.abort();
}

#[tokio::test]
async fn test_reaction_dispatch_pins_message() {
    let platform = FakePlatform::start().await.unwrap();
    seed_guild(&platform);
    let (bot, handle) = connect(&platform).await;

    platform.dispatch(
        "MESSAGE_REACTION_ADD",
        reaction_payload(MODERATOR, "📌", Some(&[PIN_ROLE])),
    );

    platform
        .wait_for(|world| world.pinned.contains(&MESSAGE))
        .await
        .expect("message should be pinned");
    platform
        .wait_for(|world| world.requests.iter().any(|r| r.body.is_some()))
        .await
        .expect("pin should be announced");
    assert_eq!(bot.store.active_count(), 1);

    handle.abort();
}

#[tokio::test]
async fn test_delete_dispatch_retires_record() {
    let platform = FakePlatform::start().await.unwrap();
    seed_guild(&platform);
    let (bot, handle) = connect(&platform).await;

    platform.dispatch(
        "MESSAGE_REACTION_ADD",
        reaction_payload(MODERATOR, "📌", Some(&[PIN_ROLE])),
    );
    platform
        .wait_for(|world| world.pinned.contains(&MESSAGE))
        .await
        .unwrap();
    for _ in 0..100 {
        if bot.store.active_count() == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(bot.store.active_count(), 1);

    platform.dispatch("MESSAGE_DELETE", message_delete_payload(MESSAGE));
    for _ in 0..100 {
        if bot.store.active_count() == 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(bot.store.active_count(), 0);
    assert_eq!(bot.store.history(MESSAGE).len(), 1);

    handle.abort();
}

#[tokio::test]
async fn test_unknown_dispatch_is_ignored() {
    let platform = FakePlatform::start().await.unwrap();
    seed_guild(&platform);
    let (_bot, handle) = connect(&platform).await;

    platform.dispatch("TYPING_START", serde_json::json!({ "user_id": "1" }));
    platform.dispatch(
        "MESSAGE_REACTION_ADD",
        reaction_payload(MODERATOR, "📌", Some(&[PIN_ROLE])),
    );

    // The session survives the unknown event and handles the next one
    platform
        .wait_for(|world| world.pinned.contains(&MESSAGE))
        .await
        .unwrap();
    assert_eq!(platform.inspect(|w| w.identifies.len()), 1);

    handle.abort();
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_reconnect_request_resumes_session() {
    let platform = FakePlatform::start().await.unwrap();
    let (_bot, handle) = connect(&platform).await;

    // READY was seq 1, this one is seq 2
    platform.dispatch("TYPING_START", json!({ "user_id": "1" }));
    platform.send_op(json!({ "op": 7, "d": null }));

    platform
        .wait_for(|world| !world.resumes.is_empty())
        .await
        .expect("client should resume");

    let resume = platform.inspect(|w| w.resumes[0].clone());
    assert_eq!(
        resume,
        json!({ "token": BOT_TOKEN, "session_id": "fake-session", "seq": 2 })
    );
    assert_eq!(platform.inspect(|w| w.identifies.len()), 1);
    assert_eq!(platform.inspect(|w| w.connections), 2);

    handle.abort();
}

#[tokio::test]
async fn test_invalid_session_identifies_again() {
    let platform = FakePlatform::start().await.unwrap();
    let (_bot, handle) = connect(&platform).await;

    platform.send_op(json!({ "op": 9, "d": false }));

    platform
        .wait_for(|world| world.identifies.len() == 2)
        .await
        .expect("client should identify again");
    assert!(platform.inspect(|w| w.resumes.is_empty()));

    handle.abort();
}

#[tokio::test]
async fn test_missing_heartbeat_ack_reconnects() {
    let platform = FakePlatform::start().await.unwrap();
    platform.configure(|world| {
        world.heartbeat_interval_ms = 50;
        world.withhold_acks = true;
    });
    let (_bot, handle) = connect(&platform).await;

    platform
        .wait_for(|world| !world.resumes.is_empty())
        .await
        .expect("zombie connection should be replaced");

    let resume = platform.inspect(|w| w.resumes[0].clone());
    assert_eq!(resume["session_id"], "fake-session");
    assert!(platform.inspect(|w| w.connections) >= 2);

    handle.abort();
}

#[tokio::test]
async fn test_fatal_close_code_stops_client() {
    let platform = FakePlatform::start().await.unwrap();
    let bot = TestBot::new(&platform).unwrap();
    let client = GatewayClient::new(GatewayConfig::from(&bot.config.bot), bot.pipeline.clone());
    let handle = tokio::spawn(client.run());

    platform
        .wait_for(|world| !world.identifies.is_empty())
        .await
        .unwrap();
    platform.close(4004, "Authentication failed");

    let err = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("client should stop")
        .unwrap()
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.close_code(), Some(CloseCode::AuthenticationFailed));
    assert_eq!(platform.inspect(|w| w.connections), 1);
}

// ============================================================================
// Shutdown
// ============================================================================

#[tokio::test]
async fn test_shutdown_waits_for_in_flight_pin() {
    let platform = FakePlatform::start().await.unwrap();
    seed_guild(&platform);
    platform.configure(|world| world.pin_delay = Duration::from_millis(300));

    let bot = TestBot::new(&platform).unwrap();
    let client = GatewayClient::new(GatewayConfig::from(&bot.config.bot), bot.pipeline.clone());
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(client.run_until(async {
        let _ = stopped.await;
    }));

    platform
        .wait_for(|world| !world.identifies.is_empty())
        .await
        .unwrap();
    platform.dispatch(
        "MESSAGE_REACTION_ADD",
        reaction_payload(MODERATOR, "📌", Some(&[PIN_ROLE])),
    );

    // Stop while the platform is still answering the pin call
    platform
        .wait_for(|world| world.requests.iter().any(|r| r.method == axum::http::Method::PUT))
        .await
        .unwrap();
    stop.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("shutdown should finish")
        .unwrap()
        .unwrap();

    assert!(platform.is_pinned(MESSAGE));
    assert_eq!(bot.store.active_count(), 1);
    assert!(platform
        .requests()
        .iter()
        .any(|r| r.is(&axum::http::Method::POST, &format!("/channels/{PINBOARD}/messages"))));
}

#[tokio::test]
async fn test_shutdown_when_idle_returns_ok() {
    let platform = FakePlatform::start().await.unwrap();
    let bot = TestBot::new(&platform).unwrap();
    let client = GatewayClient::new(GatewayConfig::from(&bot.config.bot), bot.pipeline.clone());
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(client.run_until(async {
        let _ = stopped.await;
    }));

    platform
        .wait_for(|world| !world.identifies.is_empty())
        .await
        .unwrap();
    stop.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("shutdown should finish")
        .unwrap();
    assert!(result.is_ok());
}
