#![warn(clippy::all)]

//! Same Latitude Explorer - a web-based interactive world map.
//!
//! Draws a Natural Earth world map twice, as a static base layer and a
//! rotatable translucent overlay, so latitude bands can be compared across
//! the two. Country and US state topology is fetched remotely on startup.

mod atlas;
mod geo;
mod state;
mod ui;

use eframe::egui;

use atlas::{AtlasChannel, WorldAtlas};
use state::{AppState, LoadPhase};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Same Latitude Explorer",
        native_options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct ExplorerApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Decoded atlas data, present once the load has succeeded
    atlas: Option<WorldAtlas>,

    /// Channel for the async topology fetches
    atlas_channel: AtlasChannel,
}

impl ExplorerApp {
    /// Creates a new ExplorerApp instance and kicks off the atlas load.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let atlas_channel = AtlasChannel::new();
        atlas_channel.fetch(cc.egui_ctx.clone());

        Self {
            state: AppState::new(),
            atlas: None,
            atlas_channel,
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a completed atlas load
        if let Some(result) = self.atlas_channel.try_recv() {
            match result {
                Ok(atlas) => {
                    log::info!(
                        "Atlas ready: {} countries, {} state boundaries",
                        atlas.countries.features.len(),
                        atlas.states.features.len()
                    );
                    self.state.status_message = format!(
                        "Loaded {} countries and {} states",
                        atlas.countries.features.len(),
                        atlas.states.features.len()
                    );
                    self.state.load_phase = LoadPhase::Ready;
                    self.atlas = Some(atlas);
                }
                Err(e) => {
                    log::error!("Atlas load failed: {e}");
                    self.state.status_message = format!("Load failed: {e}");
                    self.state.load_phase = LoadPhase::Failed(e.to_string());
                }
            }
        }

        // Panels render before the central canvas for egui layout
        ui::render_top_bar(ctx, &mut self.state);
        ui::render_controls(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state, self.atlas.as_ref());
    }
}

impl Drop for ExplorerApp {
    fn drop(&mut self) {
        // Teardown: an in-flight load must not publish afterwards.
        self.atlas_channel.cancel();
    }
}
