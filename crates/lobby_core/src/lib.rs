//! Lobby core: domain types, title grouping, and the pure gallery state machine.
mod effect;
mod msg;
mod query;
mod record;
mod state;
mod timeline;
mod title;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use query::{SearchQuery, YearRange, LOBBY_CARD_FORM};
pub use record::{
    MovieEntry, PreviewEntry, ProductionDate, Provenance, RawRecord, RecordId, ReleaseYear,
    NO_DESCRIPTION,
};
pub use state::AppState;
pub use timeline::{Timeline, TimelineMark, TICKS_PER_DECADE};
pub use title::{normalize_title, TitleGroups};
pub use update::update;
pub use view_model::{AnimationDirection, AppViewModel, CardView};
