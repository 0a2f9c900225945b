//! Record lifecycle: create, edit, publish, trash, restore and delete.
//!
//! Every write emits [`RecordEvent`]s to the registered listeners after the
//! store has accepted it. Publishing passes through the validation gate; a
//! rejected publish leaves the record a draft and queues an error notice
//! for the actor.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use hookblocks_core::error::AppError;
use hookblocks_core::result::AppResult;
use hookblocks_core::types::actor::Actor;
use hookblocks_database::RecordStore;
use hookblocks_entity::record::{
    ContentRecord, CreateRecord, RecordEvent, RecordStatus, UpdateRecord,
};
use hookblocks_registry::{GateDecision, RecordEventListener, ValidationGate};

use crate::notice::{Notice, NoticeQueue};

use super::admin::{AdminRow, AdminSort};

/// Result of a publish request.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    /// The stored record after the attempt.
    pub record: ContentRecord,
    /// What the gate decided.
    pub decision: GateDecision,
}

/// Manages content records on behalf of an actor.
#[derive(Debug, Clone)]
pub struct RecordService {
    /// Record store.
    store: Arc<dyn RecordStore>,
    /// Publish gate.
    gate: ValidationGate,
    /// Notified after every write.
    listeners: Vec<Arc<dyn RecordEventListener>>,
    /// User-facing notices.
    notices: Arc<NoticeQueue>,
    /// Priority used when a new record does not set one.
    default_priority: i32,
}

impl RecordService {
    /// Creates a new record service.
    pub fn new(
        store: Arc<dyn RecordStore>,
        notices: Arc<NoticeQueue>,
        default_priority: i32,
    ) -> Self {
        Self {
            store,
            gate: ValidationGate::new(),
            listeners: Vec::new(),
            notices,
            default_priority,
        }
    }

    /// Adds a listener for record events.
    pub fn with_listener(mut self, listener: Arc<dyn RecordEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Lists every record, trashed ones included.
    pub async fn list(&self, actor: &Actor) -> AppResult<Vec<ContentRecord>> {
        require_manage(actor)?;
        self.store.find_all().await
    }

    /// Lists admin rows sorted by a column.
    pub async fn admin_rows(
        &self,
        actor: &Actor,
        sort: AdminSort,
        descending: bool,
    ) -> AppResult<Vec<AdminRow>> {
        let records = self.list(actor).await?;
        let mut rows: Vec<AdminRow> = records.iter().map(AdminRow::from).collect();
        sort.sort(&mut rows, descending);
        Ok(rows)
    }

    /// Gets a single record.
    pub async fn get(&self, actor: &Actor, id: Uuid) -> AppResult<ContentRecord> {
        require_manage(actor)?;
        self.load(id).await
    }

    /// Creates a draft record.
    pub async fn create(&self, actor: &Actor, mut data: CreateRecord) -> AppResult<ContentRecord> {
        require_manage(actor)?;

        if data.priority.is_none() {
            data.priority = Some(self.default_priority);
        }

        let record = self.store.create(data).await?;
        info!(
            actor = %actor.name,
            record_id = %record.id,
            hook = %record.hook_name,
            "Record created"
        );

        self.emit(RecordEvent::Saved {
            record_id: record.id,
            status: record.status,
        })
        .await;
        Ok(record)
    }

    /// Edits record fields. Status is unchanged and not re-validated.
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        update: UpdateRecord,
    ) -> AppResult<ContentRecord> {
        require_manage(actor)?;
        if update.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let mut record = self.load(id).await?;
        if record.status == RecordStatus::Trashed {
            return Err(AppError::conflict("Trashed records cannot be edited"));
        }
        record.apply(update);

        let stored = self.store.update(&record).await?;
        info!(actor = %actor.name, record_id = %id, "Record updated");

        self.emit(RecordEvent::Saved {
            record_id: id,
            status: stored.status,
        })
        .await;
        Ok(stored)
    }

    /// Attempts to publish a record.
    ///
    /// A rejection is not an error: the record is saved as a draft and the
    /// reason is queued as an error notice for the actor. A successful
    /// publish queues an info notice naming the hook.
    pub async fn publish(&self, actor: &Actor, id: Uuid) -> AppResult<PublishOutcome> {
        require_manage(actor)?;

        let mut record = self.load(id).await?;
        let previous = record.status;
        if previous == RecordStatus::Trashed {
            return Err(AppError::conflict("Restore the record before publishing it"));
        }

        record.status = RecordStatus::Published;
        let decision = self.gate.enforce(&mut record, previous);

        let stored = self.store.update(&record).await?;

        let notice = match &decision {
            GateDecision::Allow => {
                info!(actor = %actor.name, record_id = %id, hook = %stored.hook_name, "Record published");
                Notice::info(format!("Block published at '{}'", stored.hook_name))
            }
            GateDecision::Reject { reason } => Notice::error(reason.as_str()),
        };
        if let Err(e) = self.notices.push(actor.id, notice).await {
            warn!(error = %e, actor_id = %actor.id, "Failed to queue notice");
        }

        self.transition(id, previous, stored.status).await;
        self.emit(RecordEvent::Saved {
            record_id: id,
            status: stored.status,
        })
        .await;

        Ok(PublishOutcome {
            record: stored,
            decision,
        })
    }

    /// Moves a published record back to draft.
    pub async fn unpublish(&self, actor: &Actor, id: Uuid) -> AppResult<ContentRecord> {
        self.change_status(actor, id, RecordStatus::Published, RecordStatus::Draft)
            .await
    }

    /// Moves a trashed record back to draft.
    pub async fn restore(&self, actor: &Actor, id: Uuid) -> AppResult<ContentRecord> {
        self.change_status(actor, id, RecordStatus::Trashed, RecordStatus::Draft)
            .await
    }

    /// Moves a record to the trash.
    pub async fn trash(&self, actor: &Actor, id: Uuid) -> AppResult<ContentRecord> {
        require_manage(actor)?;

        let mut record = self.load(id).await?;
        let previous = record.status;
        if previous == RecordStatus::Trashed {
            return Err(AppError::conflict("Record is already in the trash"));
        }

        record.status = RecordStatus::Trashed;
        let stored = self.store.update(&record).await?;
        info!(actor = %actor.name, record_id = %id, "Record trashed");

        self.transition(id, previous, RecordStatus::Trashed).await;
        self.emit(RecordEvent::Trashed { record_id: id }).await;
        Ok(stored)
    }

    /// Permanently deletes a record.
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        require_manage(actor)?;

        if !self.store.delete(id).await? {
            return Err(AppError::not_found(format!("Record {id} not found")));
        }
        info!(actor = %actor.name, record_id = %id, "Record deleted");

        self.emit(RecordEvent::Deleted { record_id: id }).await;
        Ok(())
    }

    /// Returns and clears the actor's pending notices.
    pub async fn take_notices(&self, actor: &Actor) -> AppResult<Vec<Notice>> {
        self.notices.take(actor.id).await
    }

    async fn change_status(
        &self,
        actor: &Actor,
        id: Uuid,
        from: RecordStatus,
        to: RecordStatus,
    ) -> AppResult<ContentRecord> {
        require_manage(actor)?;

        let mut record = self.load(id).await?;
        if record.status != from {
            return Err(AppError::conflict(format!(
                "Record is {}, expected {from}",
                record.status
            )));
        }

        record.status = to;
        let stored = self.store.update(&record).await?;
        info!(actor = %actor.name, record_id = %id, from = %from, to = %to, "Record status changed");

        self.transition(id, from, to).await;
        self.emit(RecordEvent::Saved {
            record_id: id,
            status: to,
        })
        .await;
        Ok(stored)
    }

    async fn load(&self, id: Uuid) -> AppResult<ContentRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Record {id} not found")))
    }

    async fn transition(&self, id: Uuid, from: RecordStatus, to: RecordStatus) {
        if from != to {
            self.emit(RecordEvent::StatusChanged {
                record_id: id,
                from,
                to,
            })
            .await;
        }
    }

    async fn emit(&self, event: RecordEvent) {
        for listener in &self.listeners {
            listener.on_event(&event).await;
        }
    }
}

fn require_manage(actor: &Actor) -> AppResult<()> {
    if actor.can_manage {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "'{}' is not allowed to manage blocks",
            actor.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use hookblocks_cache::CacheManager;
    use hookblocks_cache::memory::MemoryCacheProvider;
    use hookblocks_core::config::cache::MemoryCacheConfig;
    use hookblocks_core::error::ErrorKind;
    use hookblocks_database::memory::MemoryRecordStore;

    use crate::notice::NoticeLevel;

    #[derive(Debug, Default)]
    struct EventLog(Mutex<Vec<RecordEvent>>);

    #[async_trait]
    impl RecordEventListener for EventLog {
        async fn on_event(&self, event: &RecordEvent) {
            self.0.lock().await.push(event.clone());
        }
    }

    fn service() -> (RecordService, Arc<EventLog>) {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 });
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        let notices = Arc::new(NoticeQueue::new(cache, Duration::from_secs(60)));
        let log = Arc::new(EventLog::default());
        let service = RecordService::new(Arc::new(MemoryRecordStore::new()), notices, 10)
            .with_listener(Arc::clone(&log) as Arc<dyn RecordEventListener>);
        (service, log)
    }

    fn new_record(hook: &str) -> CreateRecord {
        CreateRecord {
            title: "Footer banner".to_string(),
            hook_name: hook.to_string(),
            body: "<p>hi</p>".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_viewer_cannot_create() {
        let (service, _) = service();
        let err = service
            .create(&Actor::viewer("guest"), new_record("wp_footer"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_create_uses_default_priority_and_drafts() {
        let (service, log) = service();
        let admin = Actor::admin("root");
        let record = service.create(&admin, new_record("wp_footer")).await.unwrap();

        assert_eq!(record.priority, 10);
        assert_eq!(record.status, RecordStatus::Draft);
        assert_eq!(
            log.0.lock().await.as_slice(),
            &[RecordEvent::Saved {
                record_id: record.id,
                status: RecordStatus::Draft
            }]
        );
    }

    #[tokio::test]
    async fn test_publish_with_hook() {
        let (service, _) = service();
        let admin = Actor::admin("root");
        let record = service.create(&admin, new_record("wp_footer")).await.unwrap();

        let outcome = service.publish(&admin, record.id).await.unwrap();
        assert!(outcome.decision.is_allowed());
        assert_eq!(outcome.record.status, RecordStatus::Published);

        let notices = service.take_notices(&admin).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert!(notices[0].message.contains("wp_footer"));
    }

    #[tokio::test]
    async fn test_publish_without_hook_stays_draft_with_notice() {
        let (service, log) = service();
        let admin = Actor::admin("root");
        let record = service.create(&admin, new_record("")).await.unwrap();

        let outcome = service.publish(&admin, record.id).await.unwrap();
        assert!(!outcome.decision.is_allowed());
        assert_eq!(outcome.record.status, RecordStatus::Draft);
        assert_eq!(
            service.get(&admin, record.id).await.unwrap().status,
            RecordStatus::Draft
        );

        let notices = service.take_notices(&admin).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);

        let events = log.0.lock().await;
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, RecordEvent::StatusChanged { .. }))
        );
    }

    #[tokio::test]
    async fn test_trash_restore_and_delete() {
        let (service, log) = service();
        let admin = Actor::admin("root");
        let record = service.create(&admin, new_record("wp_head")).await.unwrap();

        service.trash(&admin, record.id).await.unwrap();
        let err = service.publish(&admin, record.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let restored = service.restore(&admin, record.id).await.unwrap();
        assert_eq!(restored.status, RecordStatus::Draft);

        service.delete(&admin, record.id).await.unwrap();
        let err = service.delete(&admin, record.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let events = log.0.lock().await;
        assert!(events.contains(&RecordEvent::Trashed {
            record_id: record.id
        }));
        assert_eq!(
            events.last(),
            Some(&RecordEvent::Deleted {
                record_id: record.id
            })
        );
    }

    #[tokio::test]
    async fn test_unpublish_requires_published() {
        let (service, _) = service();
        let admin = Actor::admin("root");
        let record = service.create(&admin, new_record("wp_head")).await.unwrap();

        let err = service.unpublish(&admin, record.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        service.publish(&admin, record.id).await.unwrap();
        let draft = service.unpublish(&admin, record.id).await.unwrap();
        assert_eq!(draft.status, RecordStatus::Draft);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let (service, _) = service();
        let admin = Actor::admin("root");
        let record = service.create(&admin, new_record("wp_head")).await.unwrap();
        let err = service
            .update(&admin, record.id, UpdateRecord::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
