//! End-to-end event sequences through the dispatch path
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use std::sync::Arc;

use parking_lot::Mutex;

use crest_core::Snowflake;
use crest_gateway::{EventKind, GatewayEvent};
use integration_tests::{fixtures, TestEngine};

#[tokio::test]
async fn test_session_bootstrap_to_download_complete() {
    let harness = TestEngine::started().await;
    let completions = harness.record(EventKind::GuildDownloadComplete);

    harness
        .engine
        .dispatch("READY", fixtures::ready(&[10, 11]))
        .await;
    assert_eq!(harness.engine.guilds().len(), 2);
    assert!(completions.lock().is_empty());

    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;
    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(11))
        .await;

    let completions = completions.lock();
    assert_eq!(completions.len(), 1);
    match completions.first().map(Arc::as_ref) {
        Some(GatewayEvent::GuildDownloadComplete { guilds }) => {
            assert_eq!(guilds.len(), 2);
            assert!(guilds.iter().all(|g| !g.is_unavailable()));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_one_user_instance_across_guilds() {
    let harness = TestEngine::new();
    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;
    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(11))
        .await;

    let first = harness
        .engine
        .guild(Snowflake::new(10))
        .unwrap()
        .member(Snowflake::new(900))
        .unwrap();
    let second = harness
        .engine
        .guild(Snowflake::new(11))
        .unwrap()
        .member(Snowflake::new(900))
        .unwrap();

    // Distinct memberships, one canonical user behind them
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.read().user, &second.read().user));

    // A rename through one guild's member event is visible everywhere
    harness
        .engine
        .dispatch(
            "GUILD_MEMBER_UPDATE",
            fixtures::member(10, 900, "renamed", None),
        )
        .await;
    assert_eq!(second.read().user.read().username, "renamed");
    assert_eq!(
        harness.engine.user(Snowflake::new(900)).read().username,
        "renamed"
    );
}

#[tokio::test]
async fn test_message_flow_with_reactions() {
    let harness = TestEngine::started().await;
    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;

    harness
        .engine
        .dispatch("MESSAGE_CREATE", fixtures::message(500, 100, 901, "hello"))
        .await;
    harness
        .engine
        .dispatch(
            "MESSAGE_REACTION_ADD",
            fixtures::reaction(500, 100, 901, "👍"),
        )
        .await;
    // The client's own reaction sets the `me` flag
    harness
        .engine
        .dispatch(
            "MESSAGE_REACTION_ADD",
            fixtures::reaction(500, 100, 1, "👍"),
        )
        .await;

    let adds = harness.record(EventKind::ReactionRemove);
    harness
        .engine
        .dispatch(
            "MESSAGE_REACTION_REMOVE",
            fixtures::reaction(500, 100, 901, "👍"),
        )
        .await;

    let removes = adds.lock();
    match removes.first().map(Arc::as_ref) {
        Some(GatewayEvent::ReactionRemove { message, .. }) => {
            let message = message.as_ref().unwrap().read().clone();
            assert_eq!(message.reactions.len(), 1);
            assert_eq!(message.reactions[0].count, 1);
            assert!(message.reactions[0].me);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_message_cache_capacity_is_honored() {
    let harness = TestEngine::with_config(&integration_tests::config_with_capacity(1));
    let deletes = harness.record(EventKind::MessageDelete);

    harness
        .engine
        .dispatch("MESSAGE_CREATE", fixtures::message(500, 100, 901, "first"))
        .await;
    harness
        .engine
        .dispatch("MESSAGE_CREATE", fixtures::message(501, 100, 901, "second"))
        .await;

    // The first message was evicted, so its delete recovers nothing
    harness
        .engine
        .dispatch(
            "MESSAGE_DELETE",
            serde_json::json!({ "id": "500", "channel_id": "100" }),
        )
        .await;

    let deletes = deletes.lock();
    match deletes.first().map(Arc::as_ref) {
        Some(GatewayEvent::MessageDelete { message, .. }) => assert!(message.is_none()),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_chunk_sequence_reconciles_member_count() {
    let harness = TestEngine::new();
    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;

    harness
        .engine
        .dispatch(
            "GUILD_MEMBERS_CHUNK",
            fixtures::member_chunk(10, 0, 2, &[2000, 2001]),
        )
        .await;
    harness
        .engine
        .dispatch(
            "GUILD_MEMBERS_CHUNK",
            fixtures::member_chunk(10, 1, 2, &[2001, 2002]),
        )
        .await;

    let guild = harness.engine.guild(Snowflake::new(10)).unwrap();
    // 900 and 901 from the create, 2000..=2002 from the chunks
    assert_eq!(guild.member_count(), 5);
    assert_eq!(guild.members.len(), 5);
}

#[tokio::test]
async fn test_subscriber_fault_never_rolls_back_state() {
    let harness = TestEngine::new();
    harness.engine.subscribe(EventKind::GuildCreate, |_| {
        Box::pin(async { anyhow::bail!("consumer bug") })
    });
    let later = harness.record(EventKind::ChannelCreate);

    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;
    harness
        .engine
        .dispatch(
            "CHANNEL_CREATE",
            serde_json::json!({ "id": "55", "guild_id": "10", "type": 0, "name": "late" }),
        )
        .await;

    // The failing subscriber cost nothing: the guild stayed cached and
    // later events still flow
    assert!(harness.engine.guild(Snowflake::new(10)).is_some());
    assert_eq!(later.lock().len(), 1);
}

#[tokio::test]
async fn test_notifications_complete_in_event_order() {
    let harness = TestEngine::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for kind in [EventKind::GuildCreate, EventKind::ChannelCreate] {
        let order = order.clone();
        harness.engine.subscribe(kind, move |event| {
            let order = order.clone();
            Box::pin(async move {
                order.lock().push(event.kind());
                Ok(())
            })
        });
    }

    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;
    harness
        .engine
        .dispatch(
            "CHANNEL_CREATE",
            serde_json::json!({ "id": "55", "guild_id": "10", "type": 0, "name": "a" }),
        )
        .await;

    assert_eq!(
        *order.lock(),
        vec![EventKind::GuildCreate, EventKind::ChannelCreate]
    );
}

#[tokio::test]
async fn test_shutdown_resets_the_session() {
    let harness = TestEngine::started().await;
    harness
        .engine
        .dispatch("READY", fixtures::ready(&[]))
        .await;
    harness
        .engine
        .dispatch("GUILD_CREATE", fixtures::guild_create(10))
        .await;

    harness.engine.shutdown();
    assert!(harness.engine.guilds().is_empty());
    assert!(harness.engine.current_user().is_none());

    // A fresh READY after shutdown behaves like a first session
    let completions = harness.record(EventKind::GuildDownloadComplete);
    harness
        .engine
        .dispatch("READY", fixtures::ready(&[]))
        .await;
    assert_eq!(completions.lock().len(), 1);
}
