//! Producer-module contract and the minimal event harness.
//!
//! The real event loop, configuration system, and data-product registry
//! belong to the host. `Event` and `EventSetup` reproduce just enough of
//! that boundary to drive modules in tests and tools.

use std::collections::HashMap;

use crate::geometry::TrackerGeometry;
use crate::hit::PixelRecHit;
use crate::vertex::Vertex;

/// Conditions and services available while processing an event.
pub struct EventSetup<'a> {
    geometry: &'a dyn TrackerGeometry,
}

impl<'a> EventSetup<'a> {
    /// Creates an event setup around a geometry service.
    #[must_use]
    pub fn new(geometry: &'a dyn TrackerGeometry) -> Self {
        Self { geometry }
    }

    /// Tracker geometry for this event.
    #[must_use]
    pub fn geometry(&self) -> &dyn TrackerGeometry {
        self.geometry
    }
}

/// Minimal per-event data store.
///
/// Rec-hit collections are keyed by label; lookup of a label that was
/// never filled returns `None` rather than failing, and modules are
/// expected to tolerate it.
#[derive(Debug, Default)]
pub struct Event {
    rec_hits: HashMap<String, Vec<PixelRecHit>>,
    vertices: Vec<Vertex>,
}

impl Event {
    /// Creates an empty event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rec-hit collection under `label`.
    pub fn put_rec_hits(&mut self, label: impl Into<String>, hits: Vec<PixelRecHit>) {
        self.rec_hits.insert(label.into(), hits);
    }

    /// Looks up a rec-hit collection by label.
    #[must_use]
    pub fn rec_hits(&self, label: &str) -> Option<&[PixelRecHit]> {
        self.rec_hits.get(label).map(Vec::as_slice)
    }

    /// Stores the produced vertex collection.
    pub fn put_vertices(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
    }

    /// Produced vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// Capability contract for producer modules driven by an outer event
/// loop.
///
/// All lifecycle hooks default to no-ops; a module overrides only the
/// hooks it needs. `produce` is the one required entry point.
pub trait ProducerModule {
    /// Called once before any event is processed.
    fn begin_job(&mut self) {}

    /// Called at the start of each run.
    fn begin_run(&mut self) {}

    /// Called at the start of each luminosity section.
    fn begin_lumi_section(&mut self) {}

    /// Called when a processing stream is set up.
    fn begin_stream(&mut self, _stream_id: usize) {}

    /// Processes one event.
    fn produce(&self, event: &mut Event, setup: &EventSetup<'_>);

    /// Called when a processing stream is torn down.
    fn end_stream(&mut self, _stream_id: usize) {}

    /// Called at the end of each luminosity section.
    fn end_lumi_section(&mut self) {}

    /// Called at the end of each run.
    fn end_run(&mut self) {}

    /// Called once after all events are processed.
    fn end_job(&mut self) {}
}
