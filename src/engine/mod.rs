//! Engine orchestration.
//!
//! The engine is the core of a map application: it keeps the state of the
//! layers and dataviews, serializes that state into instantiation requests,
//! reconciles server responses back into the models, and notifies
//! subscribers of the outcome.

mod error;
mod events;

pub use error::EngineError;
pub use events::{EngineEvent, SubscriptionId};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::config::EngineSettings;
use crate::maps::{
    instantiation_url, MapRequest, MapSerializer, MapsApiClient, RequestParams, Response,
};
use crate::model::{Dataview, Dataviews, Layer, LayerGroup, Layers, RegistryError};
use crate::reconciler::ModelReconciler;
use events::EventObservers;

/// Registry state guarded by one lock.
///
/// All model mutation happens behind this lock, on the turn a response (or
/// an application call) arrives; `last_applied_seq` gates out responses of
/// reloads that were superseded while in flight.
struct EngineState {
    layers: Layers,
    dataviews: Dataviews,
    layer_group: LayerGroup,
    last_applied_seq: u64,
}

/// Sole orchestrator of the reload protocol and sole emitter of its
/// lifecycle events.
///
/// Generic over the transport client so tests can inject a mock; production
/// code uses [`ReqwestMapsClient`](crate::maps::ReqwestMapsClient).
///
/// # Example
///
/// ```ignore
/// let settings = EngineSettings::new("acme", "https://acme.example.com")
///     .with_api_key("k1");
/// let engine = Engine::new(settings, ReqwestMapsClient::new()?)?;
///
/// engine.add_layer(Layer::data("cities", "SELECT * FROM cities", CSS))?;
/// engine.on(EngineEvent::ReloadSuccess, || println!("map updated"));
/// engine.reload("cities", false).await?;
/// ```
pub struct Engine<C> {
    settings: EngineSettings,
    serializer: MapSerializer,
    reconciler: ModelReconciler,
    client: C,
    state: RwLock<EngineState>,
    observers: EventObservers,
    next_seq: AtomicU64,
}

impl<C: MapsApiClient> Engine<C> {
    /// Creates an engine from settings and a transport client.
    ///
    /// The serializer variant is resolved here, once, from the presence of
    /// a template name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when `username` or
    /// `server_url` is empty.
    pub fn new(settings: EngineSettings, client: C) -> Result<Self, EngineError> {
        if settings.username.is_empty() {
            return Err(EngineError::Configuration(
                "username must not be empty".to_string(),
            ));
        }
        if settings.server_url.is_empty() {
            return Err(EngineError::Configuration(
                "server_url must not be empty".to_string(),
            ));
        }

        let serializer = MapSerializer::from_settings(&settings);
        Ok(Self {
            settings,
            serializer,
            reconciler: ModelReconciler::new(),
            client,
            state: RwLock::new(EngineState {
                layers: Layers::new(),
                dataviews: Dataviews::new(),
                layer_group: LayerGroup::new(),
                last_applied_seq: 0,
            }),
            observers: EventObservers::new(),
            next_seq: AtomicU64::new(0),
        })
    }

    /// The settings this engine was constructed with.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Binds a handler to an engine event.
    ///
    /// Multiple handlers per event are supported and fire in registration
    /// order. Events carry no payload; handlers read updated state through
    /// the engine's accessors.
    pub fn on(
        &self,
        event: EngineEvent,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(event, handler)
    }

    /// Removes a previously bound handler.
    pub fn off(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Appends a layer to the layer registry.
    ///
    /// No synchronous side effect on the server; call [`reload`](Self::reload)
    /// to push the new state.
    pub fn add_layer(&self, layer: Layer) -> Result<(), RegistryError> {
        self.write_state().layers.add(layer)
    }

    /// Removes and returns the layer with the given id.
    pub fn remove_layer(&self, id: &str) -> Option<Layer> {
        self.write_state().layers.remove(id)
    }

    /// Appends a dataview to the dataview registry.
    pub fn add_dataview(&self, dataview: Dataview) -> Result<(), RegistryError> {
        self.write_state().dataviews.add(dataview)
    }

    /// Removes and returns the dataview with the given id.
    pub fn remove_dataview(&self, id: &str) -> Option<Dataview> {
        self.write_state().dataviews.remove(id)
    }

    /// Snapshot of the layer with the given id.
    pub fn layer(&self, id: &str) -> Option<Layer> {
        self.read_state().layers.get(id).cloned()
    }

    /// Snapshot of all layers in registry order.
    pub fn layers(&self) -> Vec<Layer> {
        self.read_state().layers.iter().cloned().collect()
    }

    /// Snapshot of the dataview with the given id.
    pub fn dataview(&self, id: &str) -> Option<Dataview> {
        self.read_state().dataviews.get(id).cloned()
    }

    /// Snapshot of all dataviews in registry order.
    pub fn dataviews(&self) -> Vec<Dataview> {
        self.read_state().dataviews.iter().cloned().collect()
    }

    /// Snapshot of the layer group.
    pub fn layer_group(&self) -> LayerGroup {
        self.read_state().layer_group.clone()
    }

    /// Runs one full request/response cycle against the maps service.
    ///
    /// Serializes the current registries, posts the payload, reconciles the
    /// reply into the models and emits [`EngineEvent::ReloadSuccess`] or
    /// [`EngineEvent::ReloadError`]. `source_id` names the logical source
    /// that triggered the reload; dataviews bound to other sources keep
    /// their last-known result unless `force_fetch` is set.
    ///
    /// Overlapping reloads are permitted; each carries a sequence token and
    /// a response older than the last applied one is dropped without
    /// touching the models or emitting an event.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`] when the registries cannot be
    /// represented in the configured wire shape; this surfaces before any
    /// network activity. Transport and service failures are reported through
    /// the reload-error event, not as an `Err`.
    pub async fn reload(&self, source_id: &str, force_fetch: bool) -> Result<(), EngineError> {
        let params = RequestParams::from_settings(&self.settings);
        let payload = {
            let state = self.read_state();
            self.serializer.serialize(&state.layers, &state.dataviews)?
        };
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let request = MapRequest::new(instantiation_url(&self.settings), payload, params);

        debug!(seq, source = source_id, force_fetch, "reload dispatched");

        match self.client.instantiate_map(&request).await {
            Ok(raw) => {
                let response = Response::new(self.settings.clone(), raw);
                let applied = {
                    let mut state = self.write_state();
                    if seq <= state.last_applied_seq {
                        debug!(
                            seq,
                            last_applied = state.last_applied_seq,
                            "dropping superseded reload response"
                        );
                        false
                    } else {
                        state.last_applied_seq = seq;
                        let state = &mut *state;
                        let errors = self.reconciler.update_models(
                            &mut state.layers,
                            &mut state.dataviews,
                            &mut state.layer_group,
                            &response,
                            source_id,
                            force_fetch,
                        );
                        if !errors.is_empty() {
                            warn!(
                                seq,
                                error_count = errors.len(),
                                "reload applied with per-entry errors"
                            );
                        }
                        true
                    }
                };
                if applied {
                    self.observers.emit(EngineEvent::ReloadSuccess);
                }
                Ok(())
            }
            Err(err) => {
                warn!(seq, error = %err, "reload failed");
                {
                    let mut state = self.write_state();
                    let state = &mut *state;
                    self.reconciler.set_errors(
                        &mut state.layers,
                        &mut state.dataviews,
                        &mut state.layer_group,
                        &err.messages(),
                    );
                }
                self.observers.emit(EngineEvent::ReloadError);
                Ok(())
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
