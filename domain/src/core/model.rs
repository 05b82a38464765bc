//! Model value object representing a generative model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generative models the curator can call (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini25Flash,
    Gemini25Pro,
    Gemini25FlashLite,
    Gemini20Flash,
    /// Image-capable variant used for poster, room and exhibit images
    Gemini25FlashImage,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini25FlashImage => "gemini-2.5-flash-image",
            Model::Custom(s) => s,
        }
    }

    /// Whether the model can return inline image data
    pub fn supports_images(&self) -> bool {
        matches!(self, Model::Gemini25FlashImage)
    }
}

impl Default for Model {
    /// Returns the default text model (Gemini 2.5 Flash)
    fn default() -> Self {
        Model::Gemini25Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.5-flash-image" => Model::Gemini25FlashImage,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
