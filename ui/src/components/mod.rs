pub mod image_select;
pub mod plant_form;
pub mod plant_table;
pub mod toast;

pub use image_select::ImageSelect;
pub use plant_form::PlantForm;
pub use plant_table::{PlantRow, PlantTable};
pub use toast::ToastContainer;
