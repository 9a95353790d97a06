//! Gateway engine - the dispatch entry point and cache owner
//!
//! Owns every store plus the notification bus and availability tracker.
//! Event ingestion is single-path: the transport collaborator feeds
//! `dispatch` one event at a time, which is what makes in-place field
//! mutation safe without per-entry write contention.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::OnceCell;

use crest_common::EngineConfig;
use crest_core::{Channel, Shared, SharedUser, Snowflake, VoiceRegion};
use crest_state::{
    BoundedMessageCache, CachedGuild, EntityStore, MessageStore, PresenceStore, UserCache,
};

use crate::availability::AvailabilityTracker;
use crate::bus::{NotificationBus, SubscriberFuture};
use crate::events::{EventKind, GatewayEvent};
use crate::rest::{CurrentApplication, RestClient, RestError};

/// Event dispatch and state synchronization engine
pub struct GatewayEngine {
    pub(crate) store: EntityStore,
    pub(crate) users: UserCache,
    pub(crate) presences: PresenceStore,
    pub(crate) messages: Arc<dyn MessageStore>,
    pub(crate) bus: NotificationBus,
    pub(crate) availability: AvailabilityTracker,
    rest: Arc<dyn RestClient>,
    pub(crate) current_user: RwLock<Option<SharedUser>>,
    application: RwLock<Option<CurrentApplication>>,
    voice_regions: OnceCell<Vec<VoiceRegion>>,
}

impl GatewayEngine {
    /// Build an engine around a request-client collaborator
    pub fn new(config: &EngineConfig, rest: Arc<dyn RestClient>) -> Self {
        Self::with_message_store(
            rest,
            Arc::new(BoundedMessageCache::new(config.cache.message_capacity)),
        )
    }

    /// Build an engine with a caller-provided message cache
    pub fn with_message_store(rest: Arc<dyn RestClient>, messages: Arc<dyn MessageStore>) -> Self {
        Self {
            store: EntityStore::new(),
            users: UserCache::new(),
            presences: PresenceStore::new(),
            messages,
            bus: NotificationBus::new(),
            availability: AvailabilityTracker::new(),
            rest,
            current_user: RwLock::new(None),
            application: RwLock::new(None),
            voice_regions: OnceCell::new(),
        }
    }

    /// Resolve the client's own identity through the REST collaborator
    ///
    /// Called once before the first dispatched event, never on the dispatch
    /// hot path.
    pub async fn startup(&self) -> Result<(), RestError> {
        let user = self.rest.fetch_current_user().await?;
        let handle = self.users.merge_update(user);
        *self.current_user.write() = Some(handle);

        let application = self.rest.fetch_current_application().await?;
        tracing::info!(application = %application.name, "engine initialized");
        *self.application.write() = Some(application);
        Ok(())
    }

    /// Available voice regions, fetched once per engine lifetime
    pub async fn voice_regions(&self) -> Result<&[VoiceRegion], RestError> {
        let regions = self
            .voice_regions
            .get_or_try_init(|| self.rest.list_voice_regions())
            .await?;
        Ok(regions)
    }

    /// Register an async subscriber for one event kind
    pub fn subscribe<F>(&self, kind: EventKind, subscriber: F)
    where
        F: Fn(Arc<GatewayEvent>) -> SubscriberFuture + Send + Sync + 'static,
    {
        self.bus.subscribe(kind, subscriber);
    }

    // === Read-only views ===

    /// Fetch a cached guild aggregate
    pub fn guild(&self, id: Snowflake) -> Option<Arc<CachedGuild>> {
        self.store.guild(id)
    }

    /// Snapshot of every cached guild
    pub fn guilds(&self) -> Vec<Arc<CachedGuild>> {
        self.store.guilds()
    }

    /// Canonical user handle, or a transient stand-in for an unknown id
    pub fn user(&self, id: Snowflake) -> SharedUser {
        self.users.get_or_create(id)
    }

    /// The user the client is authenticated as, once `startup` or READY ran
    pub fn current_user(&self) -> Option<SharedUser> {
        self.current_user.read().clone()
    }

    /// The application the client is authenticated as
    pub fn application(&self) -> Option<CurrentApplication> {
        self.application.read().clone()
    }

    /// Fetch a cached private channel
    pub fn private_channel(&self, id: Snowflake) -> Option<Shared<Channel>> {
        self.store.private_channel(id)
    }

    /// Drop all cached state and subscriber registrations
    pub fn shutdown(&self) {
        self.store.clear();
        self.users.clear();
        self.presences.clear();
        self.messages.clear();
        self.bus.clear();
        self.availability.reset();
        *self.current_user.write() = None;
        *self.application.write() = None;
        tracing::info!("engine shut down");
    }

    /// Id of the client's own user, when known
    pub(crate) fn current_user_id(&self) -> Option<Snowflake> {
        self.current_user.read().as_ref().map(|u| u.read().id)
    }
}
