mod use_plant_manager;

pub use use_plant_manager::{PlantManagerHandle, use_plant_manager};
