use plant_manager::{TimeSource, ViewState};
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Store)]
pub struct State {
    /// Plant list and form, changed only through `PlantManager`.
    pub view: ViewState,
    pub is_loading: bool,
    pub is_saving: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            view: ViewState::new(TimeSource::new().today()),
            is_loading: false,
            is_saving: false,
        }
    }
}
