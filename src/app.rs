use std::time::Duration;

use eframe::egui::{self, Color32, RichText};

use crate::config::Config;
use crate::locale::Locale;
use crate::remix::SessionSnapshot;
use crate::session::SessionHandle;
use crate::style::{self, StyleId};

/// How often to re-check the session while a remix is outstanding
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

const ERROR_TEXT: Color32 = Color32::from_rgb(220, 38, 38);
const ERROR_FILL: Color32 = Color32::from_rgb(254, 242, 242);

/// Single-page remix UI. Reads session snapshots and forwards user actions;
/// it holds no remix state of its own apart from the text being edited.
pub struct RemixerApp {
    session: SessionHandle,
    locale: Locale,
    /// Text buffer bound to the input box, mirrored into the session on change
    draft: String,
    /// Style highlighted in the selector, mirrored into the session on click
    selected_style: StyleId,
    /// Whether remixes are simulated locally
    offline: bool,
    /// Why the configuration file could not be used, if it could not
    config_error: Option<String>,
}

impl RemixerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: SessionHandle,
        config: &Config,
        offline: bool,
        config_error: Option<String>,
    ) -> Self {
        let visuals = if config.ui.dark_theme {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        let state = session.snapshot().state;

        Self {
            session,
            locale: config.ui.locale,
            draft: state.input_text,
            selected_style: state.selected_style,
            offline,
            config_error,
        }
    }

    fn render_style_selector(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(self.locale.style_heading()).strong());
        ui.add_space(4.0);

        egui::Grid::new("style_select")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (i, id) in StyleId::ALL.into_iter().enumerate() {
                    let label = style::label_of(id, self.locale);
                    let selected = self.selected_style == id;
                    if ui.selectable_label(selected, label).clicked() && !selected {
                        self.selected_style = id;
                        self.session.set_selected_style(id);
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    fn render_input(&mut self, ui: &mut egui::Ui) {
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.draft)
                .hint_text(self.locale.input_placeholder())
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.session.set_input_text(self.draft.clone());
        }
    }

    fn render_error(&self, ui: &mut egui::Ui, error: &str) {
        egui::Frame::group(ui.style())
            .fill(ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, ERROR_TEXT.gamma_multiply(0.4)))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(error).color(ERROR_TEXT));
            });
    }

    fn render_remix_button(&self, ui: &mut egui::Ui, snapshot: &SessionSnapshot) {
        let pending = snapshot.state.is_pending;
        // The session enforces the same guard; this just mirrors it
        let enabled = !pending && !self.draft.is_empty();
        let label = if pending {
            self.locale.pending_button()
        } else {
            self.locale.remix_button()
        };

        ui.horizontal(|ui| {
            let button = egui::Button::new(RichText::new(label).size(16.0))
                .min_size(egui::vec2(160.0, 32.0));
            if ui.add_enabled(enabled, button).clicked() {
                self.session.perform_remix();
                ui.ctx().request_repaint_after(PENDING_REPAINT_INTERVAL);
            }
            if pending {
                ui.spinner();
            }
        });
    }

    fn render_output(&self, ui: &mut egui::Ui, output: &str, stale: bool) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.locale.result_heading()).size(18.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.locale.copy_button()).clicked() {
                        ui.ctx().copy_text(output.to_string());
                    }
                });
            });
            ui.add_space(4.0);
            ui.label(output);
            if stale {
                ui.add_space(4.0);
                ui.label(RichText::new(self.locale.stale_hint()).italics().weak());
            }
        });
    }
}

impl eframe::App for RemixerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.session.snapshot();

        // Completion arrives from another task, so keep polling until it lands
        if snapshot.state.is_pending {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(self.locale.app_title()).size(28.0).strong());
                });
                ui.add_space(16.0);

                if let Some(error) = &self.config_error {
                    let message = format!("{}\n{}", self.locale.config_error_note(), error);
                    self.render_error(ui, &message);
                    ui.add_space(8.0);
                }

                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    self.render_style_selector(ui);
                    ui.add_space(8.0);
                    self.render_input(ui);
                });

                if let Some(error) = &snapshot.state.error_message {
                    ui.add_space(8.0);
                    self.render_error(ui, error);
                }

                ui.add_space(8.0);
                self.render_remix_button(ui, &snapshot);

                let output = snapshot.state.output_text.as_deref().filter(|o| !o.is_empty());
                if let Some(output) = output {
                    ui.add_space(12.0);
                    self.render_output(ui, output, snapshot.output_stale);
                }

                if self.offline {
                    ui.add_space(12.0);
                    ui.label(RichText::new(self.locale.offline_note()).small().weak());
                }
            });
        });
    }
}
