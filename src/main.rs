use overlay_sync::gui::OverlayDemoApp;
use overlay_sync::logging;
use overlay_sync::settings::OverlaySettings;

use eframe::egui;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let settings = OverlaySettings::load("settings.json")?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_deref().map(Path::new),
    );
    tracing::info!("starting overlay demo");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Overlay Sync")
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Overlay Sync",
        native_options,
        Box::new(move |_cc| Box::new(OverlayDemoApp::new(settings))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run overlay demo: {err}"))
}
