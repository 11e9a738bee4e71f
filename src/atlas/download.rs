//! Async fetch pipeline for the atlas topology documents.
//!
//! Uses channel-based communication to bridge the async fetches with egui's
//! synchronous update loop, and a generation token so a load that was
//! superseded or torn down can never publish its result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use eframe::egui;

use super::{parse_topology, AtlasError, Topology, WorldAtlas};

const WORLD_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-50m.json";
const US_STATES_URL: &str = "https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json";

pub type AtlasResult = Result<WorldAtlas, AtlasError>;

/// Channel-based loader for the two topology documents.
///
/// Each `fetch` starts a new generation; `cancel` (and any later `fetch`)
/// invalidates every in-flight load. Results are tagged with the generation
/// they belong to and `try_recv` silently drops stale ones, so nothing can
/// mutate application state after teardown.
pub struct AtlasChannel {
    sender: Sender<(u64, AtlasResult)>,
    receiver: Receiver<(u64, AtlasResult)>,
    generation: Arc<AtomicU64>,
}

impl Default for AtlasChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawns the concurrent fetch of both topology documents.
    pub fn fetch(&self, ctx: egui::Context) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let sender = self.sender.clone();

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_atlas().await;
            let _ = sender.send((generation, result));
            ctx.request_repaint();
        });

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(fetch_atlas()),
                Err(e) => Err(AtlasError::Network(e.to_string())),
            };
            let _ = sender.send((generation, result));
            ctx.request_repaint();
        });
    }

    /// Invalidates any in-flight load; its eventual result is discarded.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Non-blocking check for a completed load. Results from superseded
    /// generations are dropped here without ever reaching the caller.
    pub fn try_recv(&self) -> Option<AtlasResult> {
        while let Ok((generation, result)) = self.receiver.try_recv() {
            if generation == self.generation.load(Ordering::SeqCst) {
                return Some(result);
            }
            log::debug!("Discarding atlas result from superseded load");
        }
        None
    }
}

/// Fetches and decodes both documents. Issued concurrently; the first
/// failure aborts the pair and nothing is published.
async fn fetch_atlas() -> AtlasResult {
    let (world, us) = futures_util::try_join!(
        fetch_topology(WORLD_URL),
        fetch_topology(US_STATES_URL)
    )?;

    let countries = world.decode_object("countries")?;
    let states = us.decode_object("states")?;
    log::info!(
        "Decoded atlas: {} countries, {} states",
        countries.features.len(),
        states.features.len()
    );

    Ok(WorldAtlas { countries, states })
}

async fn fetch_topology(url: &str) -> Result<Topology, AtlasError> {
    log::info!("Fetching topology: {url}");
    let response = reqwest::get(url)
        .await
        .map_err(|e| AtlasError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AtlasError::Http(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AtlasError::Network(e.to_string()))?;
    parse_topology(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_generation_result_is_delivered() {
        let channel = AtlasChannel::new();
        let generation = channel.generation.fetch_add(1, Ordering::SeqCst) + 1;

        channel
            .sender
            .send((generation, Ok(WorldAtlas::default())))
            .unwrap();
        assert!(channel.try_recv().is_some());
    }

    #[test]
    fn test_cancelled_load_never_publishes() {
        let channel = AtlasChannel::new();
        let generation = channel.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Teardown happens before the fetch resolves.
        channel.cancel();
        channel
            .sender
            .send((generation, Ok(WorldAtlas::default())))
            .unwrap();
        assert!(channel.try_recv().is_none());
    }

    #[test]
    fn test_restart_discards_the_older_load() {
        let channel = AtlasChannel::new();
        let stale = channel.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let fresh = channel.generation.fetch_add(1, Ordering::SeqCst) + 1;

        channel
            .sender
            .send((stale, Err(AtlasError::Http(500))))
            .unwrap();
        channel
            .sender
            .send((fresh, Ok(WorldAtlas::default())))
            .unwrap();

        // Only the fresh result comes through.
        assert!(channel.try_recv().unwrap().is_ok());
        assert!(channel.try_recv().is_none());
    }
}
