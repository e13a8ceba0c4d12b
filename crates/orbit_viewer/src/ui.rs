use bevy::prelude::*;
use bevy_egui::egui::{ComboBox, DragValue, Ui};
use bevy_egui::{egui, EguiContexts};

use super::{FocusMode, Orrery, State};

#[derive(Resource, Debug, Clone, Default)]
pub struct UiState {
    selected_body: Option<String>,
    settings_visible: bool,
    focus_visible: bool,
}

pub fn render(
    mut commands: Commands,
    mut ui_state: ResMut<UiState>,
    mut egui_context: EguiContexts,
    mut state: ResMut<State>,
    mut orrery: ResMut<Orrery>,
    camera_transform: Query<&GlobalTransform, With<Camera>>,
) {
    let ctx = egui_context.ctx_mut();

    egui::TopBottomPanel::top("Top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Settings").clicked() {
                ui_state.settings_visible = !ui_state.settings_visible;
            }

            if ui.button("Focus").clicked() {
                ui_state.focus_visible = !ui_state.focus_visible;
            }

            let label = if state.paused { "Resume" } else { "Pause" };
            if ui.button(label).clicked() {
                state.paused = !state.paused;
                orrery.0.set_paused(state.paused);
            }
        });
    });

    egui::TopBottomPanel::bottom("Bottom").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if let Ok(camera_transform) = camera_transform.get_single() {
                let translation = camera_transform.translation();
                ui.label(format!("Camera Position: {translation}"));
            }

            let skipped = orrery.0.report.skipped.len();
            if skipped > 0 {
                ui.label(format!("{skipped} bodies failed to spawn"));
            }
        });
    });

    let mut to_remove = None;

    egui::SidePanel::left("Left").show(ctx, |ui| {
        ui.heading("Bodies:");
        for spawned in &orrery.0.bodies {
            let name = &spawned.params.name;
            let selected = ui_state.selected_body.as_ref() == Some(name);

            if ui.selectable_label(selected, name.as_str()).clicked() {
                ui_state.selected_body =
                    if selected { None } else { Some(name.clone()) };
            }
        }

        ui.separator();

        let selected = ui_state
            .selected_body
            .as_deref()
            .and_then(|name| orrery.0.body(name));

        if let Some(spawned) = selected {
            let params = &spawned.params;

            ui.heading(params.name.as_str());

            ui.label(format!("Distance: {} AU", params.distance_au));
            ui.label(format!("Size: {}", params.relative_size));
            ui.label(format!("Inclination: {}°", params.inclination_deg));
            ui.label(format!("Period: {} years", params.orbital_period_years));
            ui.label(format!("Layer: {}", params.layer_id));

            ui.label("Readouts:");
            ui.label(format!("State: {:?}", spawned.body.state()));
            ui.label(format!("Phase: {:.1}°", spawned.body.phase_deg()));
            ui.label(format!("Position: {}", spawned.body.position()));

            if ui.button("Focus").clicked() {
                state.focus_mode = FocusMode::Planet(params.name.clone());
            }

            if ui.button("Remove").clicked() {
                to_remove = Some(params.name.clone());
            }
        }

        ui.heading("Controls");
        ui.label("Scroll to zoom in & out");
        ui.label("Hold Ctrl and drag the mouse to rotate the viewport");
        ui.label("Use the focus window to focus on a different body");
    });

    if let Some(name) = to_remove {
        if let Some(removed) = orrery.0.remove_body(&name) {
            commands.entity(removed.light).despawn_recursive();
            commands.entity(removed.handle).despawn_recursive();
        }

        if state.focus_mode == FocusMode::Planet(name) {
            state.focus_mode = FocusMode::Sun;
        }
        ui_state.selected_body = None;
    }

    egui::Window::new("Settings")
        .open(&mut ui_state.settings_visible)
        .show(ctx, |ui| {
            ui.checkbox(&mut state.draw_orbits, "Draw orbits");
            value_slider_usize(ui, "Orbit segments", &mut state.orbit_segments);

            ui.checkbox(&mut state.show_light_aim, "Show compensator lights");
            value_slider(ui, "Arrow length", &mut state.aim_arrow_length);
        });

    egui::Window::new("Focus")
        .open(&mut ui_state.focus_visible)
        .show(ctx, |ui| {
            let current = match &state.focus_mode {
                FocusMode::Sun => "Sun".to_string(),
                FocusMode::Planet(planet) => planet.clone(),
            };

            ComboBox::from_label("Choose focus")
                .selected_text(&current)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(current == "Sun", "Sun").clicked() {
                        state.focus_mode = FocusMode::Sun;
                    }

                    for spawned in &orrery.0.bodies {
                        let name = &spawned.params.name;

                        if ui
                            .selectable_label(current == *name, name.as_str())
                            .clicked()
                        {
                            state.focus_mode = FocusMode::Planet(name.clone());
                        }
                    }
                });
        });
}

fn value_slider(ui: &mut Ui, name: &str, value: &mut f32) {
    ui.horizontal(|ui| {
        ui.label(name);
        ui.add(DragValue::new(value).speed(0.1).clamp_range(0.0..=f32::MAX));
    });
}

fn value_slider_usize(ui: &mut Ui, name: &str, value: &mut usize) {
    ui.horizontal(|ui| {
        ui.label(name);
        ui.add(DragValue::new(value).speed(1).clamp_range(3..=4096));
    });
}
