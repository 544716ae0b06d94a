use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use entityext_core::entity::{Entity, EntityId, EntityOwner, Identity, Snapshot, UNKNOWN_ENTITY_ID};
use entityext_core::error::{CoreError, Domain, ErrorKind, Payload, Result, Severity};
use tokio::sync::broadcast;

use crate::config::TaskConfig;
use crate::error::log_core_error;

/// Task-side owner of entities.
///
/// Responsibilities:
/// - Broadcast every snapshot its entities dispatch
/// - Attribute entity log lines to the task via `tracing`
/// - Hand out entity ids, one per label
pub struct TaskOwner {
    name: String,

    // broadcast is used so:
    // - entity operations never block on a slow observer
    // - lagging receivers drop old snapshots rather than stalling the task
    snapshots: broadcast::Sender<Snapshot>,

    // Index is the entity id.
    labels: Mutex<Vec<String>>,
}

impl TaskOwner {
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::error()
                .domain(Domain::Dispatch)
                .kind(ErrorKind::InvalidArgument)
                .msg("task name must not be empty")
                .build());
        }
        if capacity == 0 {
            return Err(CoreError::error()
                .domain(Domain::Dispatch)
                .kind(ErrorKind::InvalidArgument)
                .msg("dispatch capacity must be positive")
                .build());
        }

        let (snapshots, _rx) = broadcast::channel(capacity);

        Ok(Self {
            name,
            snapshots,
            labels: Mutex::new(Vec::new()),
        })
    }

    pub fn from_config(config: &TaskConfig) -> Result<Self> {
        Self::new(config.task_name.clone(), config.dispatch_capacity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe to every snapshot dispatched from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    /// Create an entity with the next free id.
    ///
    /// Labels are unique within a task. Ids are handed out in order and never
    /// reused; the reserved unknown-entity number is never assigned.
    pub fn reserve_entity(self: &Arc<Self>, label: impl Into<String>) -> Result<Entity> {
        self.try_reserve(label.into()).inspect_err(log_core_error)
    }

    fn try_reserve(self: &Arc<Self>, label: String) -> Result<Entity> {
        if label.is_empty() {
            return Err(CoreError::warn()
                .domain(Domain::Entity)
                .kind(ErrorKind::InvalidArgument)
                .msg("entity label must not be empty")
                .build());
        }

        let mut labels = self.labels();
        if labels.iter().any(|l| *l == label) {
            return Err(CoreError::warn()
                .domain(Domain::Entity)
                .kind(ErrorKind::AlreadyExists)
                .msgf(format_args!("entity label '{label}' already reserved"))
                .payload(Payload::Context {
                    key: "task",
                    value: self.name.clone().into(),
                })
                .build());
        }

        let id = u8::try_from(labels.len())
            .ok()
            .and_then(EntityId::new)
            .ok_or_else(|| {
                CoreError::error()
                    .domain(Domain::Entity)
                    .kind(ErrorKind::Exhausted)
                    .msg("no entity ids left")
                    .payload(Payload::Code(u32::from(UNKNOWN_ENTITY_ID)))
                    .build()
            })?;
        labels.push(label.clone());
        drop(labels);

        tracing::debug!(task = %self.name, entity = id.get(), %label, "reserved entity");

        let owner: Arc<Self> = Arc::clone(self);
        Ok(Entity::with_identity(label, Identity::Assigned(id), owner))
    }

    pub fn entity_id(&self, label: &str) -> Option<EntityId> {
        self.labels()
            .iter()
            .position(|l| l == label)
            .and_then(|i| u8::try_from(i).ok())
            .and_then(EntityId::new)
    }

    pub fn entity_label(&self, id: EntityId) -> Option<String> {
        self.labels().get(usize::from(id.get())).cloned()
    }

    fn labels(&self) -> MutexGuard<'_, Vec<String>> {
        self.labels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntityOwner for TaskOwner {
    fn dispatch(&self, snapshot: Snapshot) {
        // Ignore errors (no receivers) to keep dispatch fire-and-forget.
        let _ = self.snapshots.send(snapshot);
    }

    fn log(&self, severity: Severity, message: &str) {
        let task = self.name.as_str();
        match severity {
            Severity::Trace => tracing::trace!(task, "{message}"),
            Severity::Debug => tracing::debug!(task, "{message}"),
            Severity::Info => tracing::info!(task, "{message}"),
            Severity::Warn => tracing::warn!(task, "{message}"),
            Severity::Error | Severity::Fatal => tracing::error!(task, "{message}"),
        }
    }
}

impl std::fmt::Debug for TaskOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskOwner")
            .field("name", &self.name)
            .field("entities", &self.labels().len())
            .field("receivers", &self.snapshots.receiver_count())
            .finish()
    }
}
