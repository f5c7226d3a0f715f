//! egui renderer for the prediction form and results panel.

use eframe::egui::{self, Color32, Frame, Margin, RichText, Stroke, Ui, Vec2};

use crate::decision::RankedImportance;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::FormEntry;
use crate::features::{FEATURES, FeatureKind, TriState};
use crate::predict::Predictor;

/// Smallest window size that keeps the three-column form usable.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(920.0, 640.0);

const DISCLAIMER: &str = "Disclaimer: This application is for informational and educational \
purposes only. It does not provide medical advice, diagnosis, or treatment. Always consult a \
healthcare professional for medical concerns and before making changes to your health routine.";

const INTRO: &str = "Enter your values below. If you don't know a value, choose \
\"I don't know\" (where available) or enter -1 for numeric fields.";

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            controller: EguiController::new(predictor),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 14);
        visuals.panel_fill = Color32::from_rgb(16, 16, 18);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_disclaimer(&self, ui: &mut Ui) {
        Frame::none()
            .fill(Color32::from_rgb(26, 24, 18))
            .stroke(Stroke::new(1.0, Color32::from_rgb(240, 173, 78)))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.label(RichText::new(DISCLAIMER).color(Color32::from_rgb(170, 170, 170)).size(12.0));
            });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let entries = &mut self.controller.ui.form.entries;
        ui.columns(3, |columns| {
            for (index, spec) in FEATURES.iter().enumerate() {
                let column = &mut columns[index % 3];
                column.label(RichText::new(spec.label).color(Color32::WHITE));
                match (&mut entries[index], spec.kind) {
                    (FormEntry::Number { value }, FeatureKind::Gender) => {
                        column.add(egui::Slider::new(value, 0.0..=1.0).integer());
                    }
                    (FormEntry::Number { value }, _) => {
                        column.add(egui::DragValue::new(value).speed(0.5));
                    }
                    (FormEntry::Choice { value }, _) => {
                        egui::ComboBox::from_id_salt(spec.name)
                            .selected_text(value.label())
                            .show_ui(column, |ui| {
                                for choice in TriState::ALL {
                                    ui.selectable_value(value, choice, choice.label());
                                }
                            });
                    }
                }
                column.add_space(10.0);
            }
        });
    }

    fn render_result(&self, ui: &mut Ui) {
        let Some(result) = &self.controller.ui.result else {
            return;
        };
        ui.separator();
        ui.label(RichText::new("Predicted Probability").color(Color32::GRAY));
        ui.label(
            RichText::new(&result.probability_text)
                .color(Color32::WHITE)
                .size(28.0)
                .strong(),
        );
        ui.heading(result.headline);
        ui.add_space(6.0);

        ui.label(RichText::new(result.advice_title).strong());
        for line in result.advice_lines {
            ui.label(format!("• {line}"));
        }
        for advisory in &result.advisories {
            ui.colored_label(Color32::from_rgb(240, 173, 78), *advisory);
        }

        ui.separator();
        ui.label(RichText::new("🔍 What influenced your result most?").strong());
        ui.add_space(4.0);
        render_importance_chart(ui, &result.ranked);

        egui::CollapsingHeader::new("Show top 5 most important features")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("top_features")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Feature").strong());
                        ui.label(RichText::new("Importance").strong());
                        ui.end_row();
                        for entry in &result.top {
                            ui.label(&entry.feature);
                            ui.label(format!("{:.4}", entry.importance));
                            ui.end_row();
                        }
                    });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let mut do_predict = false;
        let mut do_reset = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_disclaimer(ui);
                ui.add_space(8.0);
                ui.heading("🩺 Diabetes Risk Predictor");
                ui.label(INTRO);
                ui.add_space(10.0);

                self.render_form(ui);

                ui.horizontal(|ui| {
                    if ui
                        .button(RichText::new("Predict").color(Color32::WHITE).strong())
                        .clicked()
                    {
                        do_predict = true;
                    }
                    if ui.button("Reset").clicked() {
                        do_reset = true;
                    }
                    let status = &self.controller.ui.status;
                    ui.colored_label(status.color, &status.text);
                });

                self.render_result(ui);
            });
        });

        if do_predict {
            self.controller.predict();
        }
        if do_reset {
            self.controller.reset_form();
        }
    }
}

/// Horizontal bar chart of importances, widest bar first.
fn render_importance_chart(ui: &mut Ui, ranked: &[RankedImportance]) {
    let max = ranked
        .first()
        .map(|entry| entry.importance)
        .filter(|max| *max > 0.0)
        .unwrap_or(1.0);
    for entry in ranked {
        ui.horizontal(|ui| {
            ui.add_sized(
                [170.0, 14.0],
                egui::Label::new(RichText::new(&entry.feature).size(12.0)),
            );
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(280.0, 12.0), egui::Sense::hover());
            let fraction = (entry.importance / max).clamp(0.0, 1.0) as f32;
            ui.painter()
                .rect_filled(rect, 2.0, Color32::from_rgb(38, 40, 46));
            let bar = egui::Rect::from_min_size(
                rect.min,
                egui::vec2(rect.width() * fraction, rect.height()),
            );
            ui.painter()
                .rect_filled(bar, 2.0, Color32::from_rgb(102, 176, 136));
            ui.label(
                RichText::new(format!("{:.4}", entry.importance))
                    .color(Color32::GRAY)
                    .size(11.0),
            );
        });
    }
}
