use super::{Action, ExamAi, UiEvent};
use crate::config::Palette;
use crate::files::{FileRow, UploadSession};
use eframe::egui::{self, Align, Align2, Color32, RichText};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);

pub fn apply_theme(ctx: &egui::Context, palette: &Palette) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.background;
    visuals.override_text_color = Some(palette.text);
    ctx.set_visuals(visuals);
}

impl ExamAi {
    /// Draw one frame and collect what the user did.
    pub fn render(&self, ctx: &egui::Context) -> Vec<UiEvent> {
        let mut events = Vec::new();

        // The upload dialog is modal: the main screen is inert while it is open.
        let main_enabled = self.session.is_none();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(main_enabled, |ui| {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("Exam AI").size(32.0).strong());
                    ui.add_space(10.0);
                    ui.label(RichText::new("Turn notes into practice.").size(18.0));
                });

                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    if ui.add(self.button("📁 Upload", [160.0, 36.0])).clicked() {
                        events.push(UiEvent::OpenUpload);
                    }
                    ui.add_space(8.0);
                    ui.label(self.state.status_text());
                });

                ui.add_space(10.0);
                egui::ScrollArea::vertical()
                    .max_height((ui.available_height() - 140.0).max(60.0))
                    .show(ui, |ui| {
                        for row in self.state.rows() {
                            if render_row(ui, row) {
                                events.push(UiEvent::RemoveCommitted(row.entry.clone()));
                            }
                        }
                    });

                ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                    ui.add_space(30.0);
                    if let Some(error) = self.state.error_message() {
                        ui.colored_label(ERROR_COLOR, error);
                        ui.add_space(5.0);
                    }
                    self.render_secondary_actions(ui, &mut events);
                    ui.add_space(10.0);
                    self.render_generate(ui, &mut events);
                });
            });
        });

        if let Some(session) = &self.session {
            self.render_upload_dialog(ctx, session, &mut events);
        }

        events
    }

    fn render_generate(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let enabled = self.state.can_generate();
        let fill = if enabled {
            self.palette.button_background
        } else {
            self.palette.button_background.gamma_multiply(0.4)
        };
        let button = styled_button("Generate", [200.0, 44.0], fill, self.palette.button_text);
        if ui.add_enabled(enabled, button).clicked() {
            events.push(UiEvent::Run(Action::Generate));
        }
    }

    fn render_secondary_actions(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let width = 2.0 * 120.0 + ui.spacing().item_spacing.x;
        ui.allocate_ui(egui::vec2(width, 40.0), |ui| {
            ui.horizontal(|ui| {
                if ui.add(self.button("History", [120.0, 40.0])).clicked() {
                    events.push(UiEvent::Run(Action::History));
                }
                if ui.add(self.button("Options", [120.0, 40.0])).clicked() {
                    events.push(UiEvent::Run(Action::Options));
                }
            });
        });
    }

    fn render_upload_dialog(
        &self,
        ctx: &egui::Context,
        session: &UploadSession,
        events: &mut Vec<UiEvent>,
    ) {
        let mut open = true;

        egui::Window::new("Upload notes")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.add(self.button("📁 Browse", [100.0, 30.0])).clicked() {
                        events.push(UiEvent::Browse);
                    }
                    if ui
                        .add_enabled(session.can_clear(), self.button("🗑 Clear", [100.0, 30.0]))
                        .clicked()
                    {
                        events.push(UiEvent::ClearStaged);
                    }
                });

                ui.add_space(8.0);
                egui::ScrollArea::vertical()
                    .max_height(200.0)
                    .show(ui, |ui| {
                        if session.rows().is_empty() {
                            ui.label(
                                RichText::new("No files selected")
                                    .color(self.palette.text.gamma_multiply(0.6)),
                            );
                        }
                        for row in session.rows() {
                            if render_row(ui, row) {
                                events.push(UiEvent::RemoveStaged(row.entry.clone()));
                            }
                        }
                    });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.add(self.button("Done", [100.0, 30.0])).clicked() {
                        events.push(UiEvent::ConfirmUpload);
                    }
                    if ui.add(self.button("Cancel", [100.0, 30.0])).clicked() {
                        events.push(UiEvent::AbandonUpload);
                    }
                });
            });

        if !open {
            events.push(UiEvent::AbandonUpload);
        }
    }

    fn button(&self, text: &str, size: [f32; 2]) -> impl egui::Widget {
        styled_button(
            text,
            size,
            self.palette.button_background,
            self.palette.button_text,
        )
    }
}

fn styled_button(text: &str, size: [f32; 2], fill: Color32, color: Color32) -> impl egui::Widget {
    egui::Button::new(RichText::new(text).strong().color(color))
        .fill(fill)
        .min_size(size.into())
}

/// Returns true when the row's delete control was clicked.
fn render_row(ui: &mut egui::Ui, row: &FileRow) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        if let Some(indicator) = row.indicator {
            ui.label(indicator);
        }
        ui.label(row.entry.name.as_str())
            .on_hover_text(row.entry.path.display().to_string());
        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
            clicked = ui.small_button("✖").on_hover_text("Remove").clicked();
        });
    });
    clicked
}
