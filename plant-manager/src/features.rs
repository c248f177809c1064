use payloads::Plant;
use std::str::FromStr;

use crate::PlantBackend;

/// Where the plant list lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// In the browser only; ids are generated client-side.
    Local,
    /// On the plant API.
    Remote,
}

/// Feature switches selecting which variant of the view is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub persistence: Persistence,
    /// Allow attaching an image to a plant.
    pub images: bool,
    /// Show the light/dark toggle.
    pub theme_toggle: bool,
}

impl Features {
    /// No network at all.
    pub const LOCAL: Features = Features {
        persistence: Persistence::Local,
        images: false,
        theme_toggle: false,
    };

    /// Create, read, update and delete through the API.
    pub const BASIC: Features = Features {
        persistence: Persistence::Remote,
        images: false,
        theme_toggle: false,
    };

    pub const IMAGES: Features = Features {
        images: true,
        ..Features::BASIC
    };

    pub const FULL: Features = Features {
        theme_toggle: true,
        ..Features::IMAGES
    };

    /// URL to show a plant's image from, or none while images are disabled.
    pub fn image_url(
        &self,
        backend: &impl PlantBackend,
        plant: &Plant,
    ) -> Option<String> {
        if !self.images {
            return None;
        }
        backend.plant_image_url(plant)
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::FULL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown profile '{0}', expected one of: local, basic, images, full"
)]
pub struct UnknownProfile(pub String);

impl FromStr for Features {
    type Err = UnknownProfile;

    /// Parse a named profile, as set through `PLANT_PROFILE`.
    fn from_str(profile: &str) -> Result<Self, Self::Err> {
        match profile.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Features::LOCAL),
            "basic" => Ok(Features::BASIC),
            "images" => Ok(Features::IMAGES),
            "full" | "" => Ok(Features::FULL),
            _ => Err(UnknownProfile(profile.to_string())),
        }
    }
}
