//! Entry point for the egui-based diabetes risk predictor.

use eframe::egui;
use glycorisk::config;
use glycorisk::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use glycorisk::logging;
use glycorisk::predict::Predictor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Glycorisk",
        native_options,
        Box::new(|_cc| match load_predictor() {
            Ok(predictor) => Ok(Box::new(EguiApp::new(predictor))),
            Err(message) => {
                tracing::error!(error = %message, "startup failed");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )?;
    Ok(())
}

/// Load config and all startup artifacts. Any failure here is fatal; the
/// app cannot serve predictions without the model and threshold.
fn load_predictor() -> Result<Predictor, String> {
    let config = config::load_or_default().map_err(|err| err.to_string())?;
    Predictor::load(&config).map_err(|err| err.to_string())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start Glycorisk");
                ui.label(&self.message);
            });
        });
    }
}
