//! Projects section: the carousel strip plus a detail panel that follows the
//! active index through the change listener.

use std::cell::Cell;
use std::rc::Rc;

use folio_carousel::RuntimeConfig;
use folio_carousel::carousel::RenderedItem;
use folio_carousel::sim::{Simulation, UniformStrip};

use crate::panel::{ProjectCard, ProjectPanel, render_card};
use crate::projects::Project;

#[derive(Debug)]
pub struct ProjectsSection {
    sim: Simulation<Project>,
    selected: Rc<Cell<usize>>,
}

impl ProjectsSection {
    pub fn new(projects: Vec<Project>, strip: UniformStrip, config: &RuntimeConfig) -> Self {
        let selected = Rc::new(Cell::new(0));
        let sink = Rc::clone(&selected);
        let mut sim = Simulation::unlaid(projects, strip, config);
        sim.carousel_mut()
            .set_active_index_listener(Some(Box::new(move |index| {
                log::debug!("Projects panel now shows item {index}");
                sink.set(index);
            })));
        sim.layout();
        Self { sim, selected }
    }

    /// Index shown in the detail panel, `None` when there are no projects.
    pub fn selected(&self) -> Option<usize> {
        (!self.sim.carousel().items().is_empty()).then(|| self.selected.get())
    }

    pub fn panel(&self) -> Option<ProjectPanel> {
        let index = self.selected()?;
        self.sim
            .carousel()
            .items()
            .get(index)
            .map(|project| ProjectPanel::new(index, project))
    }

    pub fn cards(&self) -> Vec<RenderedItem<String, ProjectCard>> {
        self.sim.carousel().render(render_card)
    }

    /// Scroll the strip to the nearest card of `logical_index`.
    pub fn visit(&mut self, logical_index: usize) {
        self.sim.visit(logical_index);
    }

    pub fn simulation(&self) -> &Simulation<Project> {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation<Project> {
        &mut self.sim
    }
}
