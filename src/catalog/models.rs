//! Photo records as returned by the rover photos endpoint.
//!
//! Only `id` and `img_src` matter for downloading. The nested camera and rover
//! records are kept for logging. Unknown fields are ignored and missing ones fall
//! back to defaults, so a sparse record still decodes.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogResponse {
    #[serde(deserialize_with = "null_as_empty")]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: u64,
    pub sol: u64,
    pub camera: Camera,
    pub img_src: String,
    pub earth_date: String,
    pub rover: Rover,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub id: u64,
    pub name: String,
    pub rover_id: u64,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rover {
    pub id: u64,
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Photo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Photo>>::deserialize(deserializer)?.unwrap_or_default())
}
