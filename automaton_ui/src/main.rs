// main.rs - Desktop front end for the cellular automaton engine

use eframe::egui;
use egui::Color32;

mod metrics;
mod ui;

use automaton::{Engine, SimulationConfig};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let engine = match Engine::new(SimulationConfig::default()) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("cannot start simulation: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cellular Automaton",
        options,
        Box::new(move |cc| Box::new(AutomatonApp::new(engine, &cc.egui_ctx))),
    )
}

pub struct AutomatonApp {
    engine: Engine,
    /// Settings as edited in the side panel, pushed to the engine while stopped.
    draft: SimulationConfig,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub last_error: Option<String>,
}

impl AutomatonApp {
    fn new(mut engine: Engine, ctx: &egui::Context) -> Self {
        let repaint = ctx.clone();
        engine.set_tick_waker(move || repaint.request_repaint());

        Self {
            draft: engine.config().clone(),
            engine,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            last_error: None,
        }
    }

    /// Pushes side-panel edits into the engine.
    fn sync_draft(&mut self) {
        if self.draft.neighborhood != self.engine.config().neighborhood {
            self.engine.select_neighborhood(self.draft.neighborhood);
        }
        if self.draft == *self.engine.config() || self.engine.status() != automaton::RunStatus::Stopped {
            return;
        }
        match self.engine.reconfigure(self.draft.clone()) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                log::warn!("configuration rejected: {err}");
                self.last_error = Some(err.to_string());
                self.draft = self.engine.config().clone();
            }
        }
    }
}
