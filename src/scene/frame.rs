use nalgebra::Point2;

use crate::model::{BodyRef, Registry};

use super::backend::{InfoPayload, SceneBackend, UiSink};
use super::graph::SceneGraph;
use super::pick;
use super::rig::CameraRig;
use super::sim::Simulator;

/// The scene simulation and interaction layer. Input handlers only record
/// state; every mutation that affects the simulation happens inside
/// [`App::frame`], so each rendered frame sees one consistent state.
pub struct App {
    registry: Registry,
    graph: SceneGraph,
    sim: Simulator,
    rig: CameraRig,
    selection: Option<BodyRef>,
    hovered: Option<BodyRef>,
    pointer: Point2<f32>,
    click_queued: bool,
    deselect_queued: bool,
}

impl App {
    pub fn new(registry: Registry, backend: &mut dyn SceneBackend, aspect: f32) -> Self {
        let graph = SceneGraph::build(&registry, backend);
        App {
            registry,
            graph,
            sim: Simulator::default(),
            rig: CameraRig::new(aspect),
            selection: None,
            hovered: None,
            pointer: Point2::origin(),
            click_queued: false,
            deselect_queued: false,
        }
    }

    // -- event side: record only, applied on the next frame --

    pub fn pointer_moved(&mut self, ndc: Point2<f32>) {
        self.pointer = ndc;
    }

    pub fn clicked(&mut self) {
        self.click_queued = true;
    }

    pub fn deselect(&mut self) {
        self.deselect_queued = true;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.rig.set_aspect(aspect);
    }

    // -- accessors --

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn selection(&self) -> Option<BodyRef> {
        self.selection
    }

    pub fn hovered(&self) -> Option<BodyRef> {
        self.hovered
    }

    /// One frame of the loop: advance the simulation from the injected
    /// clock, resolve hover and emit label state, apply any recorded click
    /// or deselect, then advance camera transitions. The shell renders
    /// afterwards.
    pub fn frame(
        &mut self,
        backend: &mut dyn SceneBackend,
        ui: &mut dyn UiSink,
        elapsed: f64,
        dt: f64,
    ) {
        self.sim
            .advance(&mut self.graph, &self.registry, backend, elapsed, dt);

        self.hovered = pick::resolve_at(self.pointer, &self.rig, &self.graph);
        self.emit_labels(ui);

        if self.click_queued {
            self.click_queued = false;
            // A click on empty sky leaves the selection as it was.
            if let Some(hit) = pick::resolve_at(self.pointer, &self.rig, &self.graph) {
                self.select(hit, ui);
            }
        }

        if self.deselect_queued {
            self.deselect_queued = false;
            self.selection = None;
            ui.close_info();
            self.rig.unfocus();
        }

        self.rig.tick(dt as f32);
    }

    /// Replaces any prior selection, shows the info panel, and starts the
    /// camera fly-to.
    fn select(&mut self, body: BodyRef, ui: &mut dyn UiSink) {
        let (Some((position, radius)), Some(info)) =
            (self.graph.sphere_of(body), self.info_payload(body))
        else {
            log::warn!("selection of unknown body {:?} ignored", body);
            return;
        };

        self.selection = Some(body);
        ui.show_info(&info);
        self.rig.focus(position, radius);
    }

    fn info_payload(&self, body: BodyRef) -> Option<InfoPayload> {
        let desc = self.registry.get(body.body_id())?;
        match body {
            BodyRef::Planet(_) => Some(InfoPayload::new(desc.name, &desc.facts)),
            BodyRef::Moon(_) => {
                let moon = desc.moon.as_ref()?;
                Some(InfoPayload::new(moon.name, &moon.facts))
            }
        }
    }

    /// Label state for every body, every frame; only the hovered body (if
    /// any) is visible.
    fn emit_labels(&self, ui: &mut dyn UiSink) {
        for body in self.graph.bodies() {
            let Some(desc) = self.registry.get(body.id) else {
                continue;
            };

            let planet = BodyRef::Planet(body.id);
            ui.label(planet, desc.name, self.hovered == Some(planet));

            if let (Some(_), Some(spec)) = (&body.moon, &desc.moon) {
                let moon = BodyRef::Moon(body.id);
                ui.label(moon, spec.name, self.hovered == Some(moon));
            }
        }
    }
}
