use jiff::civil::Date;
use payloads::{Location, Plant, requests::PlantDetails};

/// Text of the plant form, as typed by the user.
///
/// Fields are kept as strings until submit so that partially entered values
/// survive re-renders; `validate` turns them into a request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub name: String,
    pub species: String,
    /// `YYYY-MM-DD`, the value format of a date input.
    pub purchase_date: String,
    /// Location code, empty while nothing is selected.
    pub location: String,
    pub notes: String,
}

/// A form field, named as in the form's `name` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Species,
    PurchaseDate,
    Location,
    Notes,
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Name => "plantName",
            FormField::Species => "species",
            FormField::PurchaseDate => "purchaseDate",
            FormField::Location => "location",
            FormField::Notes => "notes",
        }
    }
}

/// Reasons a form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("植物の名前を入力してください")]
    MissingName,
    #[error("設置場所を選択してください")]
    MissingLocation,
    #[error("不明な設置場所です: {0}")]
    UnknownLocation(String),
    #[error("購入日を入力してください")]
    MissingPurchaseDate,
    #[error("購入日の形式が正しくありません: {0}")]
    InvalidPurchaseDate(String),
}

impl FormState {
    /// An empty form with the purchase date defaulted to `today`.
    pub fn new(today: Date) -> Self {
        Self {
            purchase_date: today.to_string(),
            ..Default::default()
        }
    }

    /// A form pre-filled from an existing plant. A plant without a purchase
    /// date gets `today`.
    pub fn from_plant(plant: &Plant, today: Date) -> Self {
        Self {
            name: plant.name.clone(),
            species: plant.species.clone(),
            purchase_date: plant.purchase_date.unwrap_or(today).to_string(),
            location: plant.location.clone(),
            notes: plant.notes().to_string(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Species => &self.species,
            FormField::PurchaseDate => &self.purchase_date,
            FormField::Location => &self.location,
            FormField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Species => self.species = value,
            FormField::PurchaseDate => self.purchase_date = value,
            FormField::Location => self.location = value,
            FormField::Notes => self.notes = value,
        }
    }

    /// Check required fields and build the request body.
    pub fn validate(&self) -> Result<PlantDetails, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let location = match self.location.trim() {
            "" => return Err(FormError::MissingLocation),
            code => code
                .parse::<Location>()
                .map_err(|_| FormError::UnknownLocation(code.to_string()))?,
        };

        let purchase_date = match self.purchase_date.trim() {
            "" => return Err(FormError::MissingPurchaseDate),
            date => date
                .parse::<Date>()
                .map_err(|_| FormError::InvalidPurchaseDate(date.to_string()))?,
        };

        Ok(PlantDetails {
            name: name.to_string(),
            species: self.species.trim().to_string(),
            description: self.notes.clone(),
            location,
            purchase_date,
        })
    }
}
