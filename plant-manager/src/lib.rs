//! View controller for the houseplant inventory: the state behind the plant
//! form and table, and the operations that change it.
//!
//! The same controller serves every variant of the view. `Features` picks
//! whether plants live in memory or on the plant API, whether images can be
//! attached, and whether the theme toggle is shown.

pub mod backend;
pub mod features;
pub mod form;
pub mod image;
pub mod local;
pub mod manager;
pub mod time;

pub use backend::{Backend, PlantBackend};
pub use features::{Features, Persistence};
pub use form::{FormError, FormField, FormState};
pub use image::PendingImage;
pub use local::LocalBackend;
pub use manager::{ManagerError, PlantManager, ViewState};
pub use payloads::location_label;
pub use time::TimeSource;

/// Address of the plant API when none is configured.
pub const DEFAULT_API_ADDRESS: &str = "http://localhost:8080";
