// ui.rs - egui front end over a scheduler-driven simulation
// Sends commands through the SimulationHandle and paints the latest snapshot

use std::time::{SystemTime, UNIX_EPOCH};

use conway::{patterns, scheduler, Config, Simulation, SimulationHandle};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const BOX_SIZE: f32 = 15.0;
const SPACING: f32 = 0.5;
const PITCH: f32 = BOX_SIZE + SPACING;

pub fn window_size(config: &Config) -> [f32; 2] {
    let grid = grid_extent(config.rows(), config.cols());
    [grid.x.max(560.0) + 40.0, grid.y + 260.0]
}

fn grid_extent(rows: usize, cols: usize) -> Vec2 {
    Vec2::new(PITCH * cols as f32 - SPACING, PITCH * rows as f32 - SPACING)
}

/// Maps a pointer position to the cell under it.
fn cell_at(origin: Pos2, pos: Pos2, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let (row, col) = ((offset.y / PITCH) as usize, (offset.x / PITCH) as usize);
    (row < rows && col < cols).then_some((row, col))
}

pub struct LifeApp {
    handle: SimulationHandle,
    driver: Option<JoinHandle<Simulation>>,
    runtime: Runtime,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
}

impl LifeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, runtime: Runtime) -> Self {
        let (handle, driver) = scheduler::spawn_on(Simulation::new(config), runtime.handle());

        // Repaint whenever the simulation publishes a new generation
        let mut watcher = handle.clone();
        let ctx = cc.egui_ctx.clone();
        runtime.spawn(async move {
            while watcher.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        Self {
            handle,
            driver: Some(driver),
            runtime,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
        }
    }

    fn dispatch(&self, result: conway::Result<()>) {
        if let Err(e) = result {
            warn!(%e, "command not delivered");
        }
    }
}

impl Drop for LifeApp {
    fn drop(&mut self) {
        self.dispatch(self.handle.shutdown());
        if let Some(driver) = self.driver.take() {
            match self.runtime.block_on(driver) {
                Ok(simulation) => {
                    let generation = simulation.generation();
                    let grid = simulation.teardown();
                    info!(generation, population = grid.population(), "simulation finished");
                }
                Err(e) => warn!(%e, "scheduler task failed"),
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.handle.snapshot();
        let (rows, cols) = (snapshot.grid.rows(), snapshot.grid.cols());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                if ui.button(snapshot.label.to_string()).clicked() {
                    let result = if snapshot.playing {
                        self.handle.pause()
                    } else {
                        self.handle.start()
                    };
                    self.dispatch(result);
                }

                if ui.button("clear").clicked() {
                    self.dispatch(self.handle.clear());
                }

                if ui.add_enabled(!snapshot.playing, egui::Button::new("step")).clicked() {
                    self.dispatch(self.handle.step());
                }

                if ui.button("random").clicked() {
                    let seed = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map(|d| d.as_nanos() as u64)
                        .unwrap_or(snapshot.generation);
                    self.dispatch(self.handle.randomize(seed));
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("apply").clicked() {
                    let pattern = &patterns::PATTERNS[self.selected_pattern];
                    self.dispatch(self.handle.load_pattern(pattern));
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", snapshot.generation));
                ui.separator();
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click cells to toggle them while paused.");
            ui.label("Use start/pause to run the simulation.");

            ui.separator();

            // Draw the grid
            let total_size = grid_extent(rows, cols);
            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(Rect::from_min_size(origin, total_size), 0.0, Color32::BLACK);

            for (row, col, state) in snapshot.grid.iter() {
                let rect = Rect::from_min_size(
                    egui::pos2(origin.x + col as f32 * PITCH, origin.y + row as f32 * PITCH),
                    Vec2::splat(BOX_SIZE),
                );
                let color = if state.is_alive() { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
            }

            // Toggle on click (only when not running)
            if !snapshot.playing && response.clicked() {
                if let Some((row, col)) = response
                    .interact_pointer_pos()
                    .and_then(|pos| cell_at(origin, pos, rows, cols))
                {
                    self.dispatch(self.handle.toggle_cell(row, col));
                }
            }

            ui.separator();

            // Statistics
            let total = rows * cols;
            let live_cells = snapshot.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_to_cell() {
        let origin = egui::pos2(10.0, 20.0);
        assert_eq!(cell_at(origin, egui::pos2(10.0, 20.0), 24, 24), Some((0, 0)));
        let inside = egui::pos2(10.0 + PITCH * 3.5, 20.0 + PITCH * 2.1);
        assert_eq!(cell_at(origin, inside, 24, 24), Some((2, 3)));
        assert_eq!(cell_at(origin, egui::pos2(9.0, 25.0), 24, 24), None);
        assert_eq!(cell_at(origin, egui::pos2(10.0 + PITCH * 24.0 + 1.0, 25.0), 24, 24), None);
    }

    #[test]
    fn window_fits_grid() {
        let config = Config::new(40, 60, 100).unwrap();
        let [w, h] = window_size(&config);
        let grid = grid_extent(40, 60);
        assert!(w > grid.x && h > grid.y);
    }
}
