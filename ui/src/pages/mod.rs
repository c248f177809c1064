mod plant_manager;

pub use plant_manager::PlantManagerPage;
