use anyhow::{bail, Result};
use lobby_core::{update, AppState, AppViewModel, Effect, Msg};
use lobby_engine::{EngineEvent, EngineHandle};
use lobby_logging::{lobby_debug, lobby_info};

/// Drives the gallery state machine and executes its effects on the engine.
pub struct GalleryRunner {
    engine: EngineHandle,
    state: AppState,
}

impl GalleryRunner {
    pub fn new(engine: EngineHandle, state: AppState) -> Self {
        Self { engine, state }
    }

    /// Selects a decade and blocks until its gallery is on screen.
    ///
    /// The returned view is `dirty` when the selection changed what is shown.
    pub fn select_year(&mut self, year: i32) -> Result<AppViewModel> {
        let effects = self.dispatch(Msg::YearSelected(year));
        self.run_effects(effects);

        while self.state.is_loading() {
            match self.engine.recv() {
                Some(EngineEvent::GalleryLoaded(load)) => {
                    lobby_debug!(
                        "Gallery {} arrived with {} cards (cache hit: {})",
                        load.year,
                        load.entries.len(),
                        load.cache_hit
                    );
                    let effects = self.dispatch(Msg::GalleryLoaded {
                        year: load.year,
                        entries: load.entries,
                    });
                    self.run_effects(effects);
                }
                Some(EngineEvent::CacheCleared) => {}
                None => bail!("engine stopped before the {year} gallery loaded"),
            }
        }

        let view = self.state.view();
        self.state.consume_dirty();
        Ok(view)
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        effects
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadGallery { year } => {
                    lobby_info!("LoadGallery year={}", year);
                    self.engine.load_year(year);
                }
                Effect::ScrollToGallery => {
                    // Terminal output has nothing to scroll.
                }
            }
        }
    }
}
