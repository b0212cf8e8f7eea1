// ui.rs - Configuration panel, controls and grid canvas

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};

use automaton::config::{DIMENSION_RANGE, LIVE_PERCENT_RANGE, TICK_INTERVAL_MAX, TICK_INTERVAL_MIN};
use automaton::{BoundaryMode, InputMode, NeighborhoodKind, PATTERNS, RunStatus};

use crate::AutomatonApp;
use crate::metrics::GridMetrics;

impl eframe::App for AutomatonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ticks delivered by the background timer are stepped here, on the UI thread
        self.engine.pump();

        egui::SidePanel::left("configuration")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| self.configuration_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.field_panel(ui));

        self.sync_draft();

        if self.engine.status() == RunStatus::Running {
            ctx.request_repaint_after(self.engine.config().tick_interval);
        }
    }
}

impl AutomatonApp {
    fn configuration_panel(&mut self, ui: &mut egui::Ui) {
        let status = self.engine.status();
        let stopped = status == RunStatus::Stopped;

        ui.heading("Grid");
        ui.add_enabled_ui(stopped, |ui| {
            ui.add(egui::Slider::new(&mut self.draft.rows, DIMENSION_RANGE).text("Rows"));
            ui.add(egui::Slider::new(&mut self.draft.cols, DIMENSION_RANGE).text("Cols"));

            ui.horizontal(|ui| {
                for mode in BoundaryMode::ALL {
                    ui.radio_value(&mut self.draft.boundary, mode, mode.display_name());
                }
            });
            ui.horizontal(|ui| {
                for input in InputMode::ALL {
                    ui.radio_value(&mut self.draft.input, input, input.display_name());
                }
            });

            let automatic = self.engine.config().input == InputMode::Automatic;
            if ui.add_enabled(automatic, egui::Button::new("🎲 Randomise")).clicked() {
                self.engine.randomize();
            }
        });

        ui.separator();
        ui.heading("Game");

        // Neighborhood may change while paused; it is picked up on continue
        ui.add_enabled_ui(status != RunStatus::Running, |ui| {
            egui::ComboBox::from_label("Neighborhood")
                .selected_text(self.draft.neighborhood.display_name())
                .show_ui(ui, |ui| {
                    for kind in NeighborhoodKind::ALL {
                        ui.selectable_value(&mut self.draft.neighborhood, kind, kind.display_name());
                    }
                });
        });

        ui.add_enabled_ui(stopped, |ui| {
            ui.add(egui::Slider::new(&mut self.draft.live_percent, LIVE_PERCENT_RANGE).text("Live %"));

            let mut millis = self.draft.tick_interval.as_millis() as u64;
            let range = TICK_INTERVAL_MIN.as_millis() as u64..=TICK_INTERVAL_MAX.as_millis() as u64;
            if ui.add(egui::Slider::new(&mut millis, range).suffix(" ms").text("Tick")).changed() {
                self.draft.tick_interval = Duration::from_millis(millis);
            }
        });

        ui.separator();
        ui.heading("Patterns");
        ui.add_enabled_ui(stopped, |ui| {
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });
                if ui.button("Apply").clicked() {
                    self.engine.load_pattern(&PATTERNS[self.selected_pattern]);
                }
            });
        });

        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });

        ui.separator();
        self.controls(ui, status);

        ui.separator();
        let stats = self.engine.stats();
        let cells = self.engine.grid().cells().len();
        ui.label(format!("Status: {}", stats.status));
        ui.label(format!("Epoch: {}", stats.epoch));
        ui.label(format!("Live cells: {}", stats.live_count));
        ui.label(format!("Population: {:.1}%", stats.live_count as f32 / cells as f32 * 100.0));
        if stats.cycle_detected {
            ui.colored_label(Color32::YELLOW, "Cycle detected");
        }
        if let Some(err) = &self.last_error {
            ui.colored_label(Color32::RED, err.as_str());
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, status: RunStatus) {
        ui.horizontal(|ui| {
            if ui.add_enabled(status == RunStatus::Stopped, egui::Button::new("▶ Start")).clicked() {
                self.engine.start();
            }

            let pause_text = if status == RunStatus::Paused { "▶ Continue" } else { "⏸ Pause" };
            if ui.add_enabled(status != RunStatus::Stopped, egui::Button::new(pause_text)).clicked() {
                if status == RunStatus::Paused {
                    self.engine.resume();
                } else {
                    self.engine.pause();
                }
            }

            if ui.add_enabled(status != RunStatus::Stopped, egui::Button::new("⏹ Reset")).clicked() {
                self.engine.reset();
                self.draft = self.engine.config().clone();
            }

            if ui.add_enabled(status != RunStatus::Running, egui::Button::new("⏭ Step")).clicked() {
                self.engine.step();
            }
        });
    }

    fn field_panel(&mut self, ui: &mut egui::Ui) {
        let grid = self.engine.grid();
        let available = ui.available_size();
        let metrics = GridMetrics::calculate(grid.rows(), grid.cols(), available.x, available.y);

        let (response, painter) = ui.allocate_painter(available, egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::BLACK);

        let gap = if metrics.cell_size > 4.0 { 0.5 } else { 0.0 };
        for row in 0..grid.rows() {
            for (col, &cell) in grid.row(row).iter().enumerate() {
                let (x, y) = metrics.cell_origin(row, col);
                let rect = Rect::from_min_size(
                    origin + Vec2::new(x, y),
                    Vec2::splat(metrics.cell_size - gap),
                );
                let color = if cell == 1 { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                if gap > 0.0 {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        // Manual edits; the engine ignores them unless stopped in manual mode
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - origin;
                if let Some((row, col)) = metrics.cell_at(local.x, local.y) {
                    self.engine.toggle_cell(row, col);
                }
            }
        }
    }
}
