//! FormSync Client Suite
//!
//! Client-side workflow for REST collection endpoints (list via GET,
//! create via POST):
//! - Form submission: validate, POST, reset on success
//! - List synchronization: fetch, replace wholesale, refetch after mutate
//! - Observable state: every mutation is announced on an event channel so
//!   a rendering layer can redraw
//!
//! # Architecture
//! ```text
//! user input ──> FormController ── validate ──> CollectionApi ── POST ──> server
//!                     │                              │
//!                     │ success                      │ GET
//!                     ▼                              ▼
//!              refetch trigger ──────────> ListSynchronizer ──> CollectionState
//! ```
//!
//! The facade is [`CollectionClient`], one per collection endpoint. State
//! lives behind scoped locks that are never held across an await.

use serde::Serialize;
use std::collections::HashMap;

pub mod api;
pub mod error;
pub mod form;
pub mod record;
pub mod schema;
pub mod sync;

pub use error::{ApiError, ClientError};
pub use form::{FormController, SubmissionStatus};
pub use record::{Record, RecordId};
pub use schema::{FieldKind, FieldSpec, FormSchema};
pub use sync::{CollectionState, ListSynchronizer};

use serde_json::Value;

/// Configuration for one collection endpoint.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Server base URL, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Collection path under the base URL, e.g. `/api/blogs`.
    pub collection_path: String,
    /// Key tried when the list body is a wrapper object instead of a bare
    /// array, e.g. `blogs`.
    pub wrapper_key: String,
    /// Create-form schema for this collection.
    pub schema: FormSchema,
}

/// Client events for UI binding.
#[derive(Clone, Debug, Serialize)]
pub enum ClientEvent {
    FieldChanged { field: String },
    ValidationFailed { fields: Vec<String> },
    StatusChanged(SubmissionStatus),
    RecordCreated,
    RecordUpdated,
    RecordDeleted,
    CollectionLoading,
    CollectionUpdated { count: usize },
    CollectionError { message: String },
}

/// One client per collection endpoint: owns the form controller and the
/// list synchronizer, and wires the one-way refetch trigger between them.
pub struct CollectionClient {
    config: SessionConfig,
    api: api::CollectionApi,
    form: parking_lot::RwLock<FormController>,
    list: ListSynchronizer,
    event_tx: tokio::sync::broadcast::Sender<ClientEvent>,
}

impl CollectionClient {
    pub fn new(config: SessionConfig) -> Result<Self, ClientError> {
        let api = api::CollectionApi::new(&config.base_url, &config.collection_path)?;
        let (event_tx, _) = tokio::sync::broadcast::channel(100);

        Ok(Self {
            form: parking_lot::RwLock::new(FormController::new(config.schema.clone())),
            list: ListSynchronizer::new(),
            api,
            config,
            event_tx,
        })
    }

    /// Subscribe to state-change events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ClientEvent> {
        self.event_tx.subscribe()
    }

    pub fn form_status(&self) -> SubmissionStatus {
        self.form.read().status().clone()
    }

    pub fn form_values(&self) -> HashMap<String, String> {
        self.form.read().values().clone()
    }

    pub fn form_errors(&self) -> HashMap<String, String> {
        self.form.read().errors().clone()
    }

    /// Current collection snapshot.
    pub fn collection(&self) -> CollectionState {
        self.list.snapshot()
    }

    /// Record a field edit.
    pub fn update_field(&self, name: &str, value: impl Into<String>) {
        self.form.write().update_field(name, value);
        self.emit_event(ClientEvent::FieldChanged {
            field: name.to_string(),
        });
    }

    /// Run validation without submitting.
    pub fn validate(&self) -> HashMap<String, String> {
        self.form.read().validate()
    }

    /// Validate and submit the form. A form that fails validation never
    /// reaches the network; a successful create resets the fields and
    /// triggers exactly one collection refetch.
    pub async fn submit(&self) -> SubmissionStatus {
        let payload = {
            let mut form = self.form.write();
            if !form.begin_submit() {
                let mut fields: Vec<String> = form.errors().keys().cloned().collect();
                fields.sort();
                let status = form.status().clone();
                drop(form);
                self.emit_event(ClientEvent::ValidationFailed { fields });
                return status;
            }
            form.build_payload()
        };
        self.emit_event(ClientEvent::StatusChanged(SubmissionStatus::Submitting));

        let outcome = self.api.create(&payload).await;

        let status = {
            let mut form = self.form.write();
            form.complete_submit(outcome.map(|_| ()).map_err(|e| e.to_string()));
            form.status().clone()
        };
        self.emit_event(ClientEvent::StatusChanged(status.clone()));

        if status == SubmissionStatus::Succeeded {
            self.emit_event(ClientEvent::RecordCreated);
            self.refresh().await;
        }

        status
    }

    /// Reload the collection from the server. Returns the resulting
    /// snapshot; a stale response (an overlapping fetch finished after a
    /// newer one started) is discarded and the current snapshot returned.
    pub async fn refresh(&self) -> CollectionState {
        let generation = self.list.begin();
        self.emit_event(ClientEvent::CollectionLoading);

        let outcome = self.api.fetch_collection(&self.config.wrapper_key).await;

        if self.list.complete(generation, outcome) {
            let state = self.list.snapshot();
            match &state.error {
                Some(message) => self.emit_event(ClientEvent::CollectionError {
                    message: message.clone(),
                }),
                None => self.emit_event(ClientEvent::CollectionUpdated {
                    count: state.records.len(),
                }),
            }
            state
        } else {
            self.list.snapshot()
        }
    }

    /// Update an existing record; refetches the collection on success.
    pub async fn update_record(&self, id: &RecordId, payload: &Value) -> Result<Value, ApiError> {
        let updated = self.api.update(id, payload).await?;
        self.emit_event(ClientEvent::RecordUpdated);
        self.refresh().await;
        Ok(updated)
    }

    /// Delete a record; refetches the collection on success.
    pub async fn delete_record(&self, id: &RecordId) -> Result<Value, ApiError> {
        let deleted = self.api.delete(id).await?;
        self.emit_event(ClientEvent::RecordDeleted);
        self.refresh().await;
        Ok(deleted)
    }

    /// Backend liveness probe.
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.api.health().await
    }

    fn emit_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event);
    }
}
