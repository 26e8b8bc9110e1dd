use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::YearSelected(year) => {
            if !state.timeline().contains(year) || state.active_year() == Some(year) {
                return (state, Vec::new());
            }
            let had_previous = state.active_year().is_some();
            state.activate_year(year);
            let mut effects = vec![Effect::LoadGallery { year }];
            if had_previous {
                effects.push(Effect::ScrollToGallery);
            }
            effects
        }
        Msg::GalleryLoaded { year, entries } => {
            // A slower load for a decade the user already left must not
            // replace the current cards.
            if state.active_year() == Some(year) {
                state.apply_loaded(entries);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
