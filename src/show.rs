use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// A single show as returned by the catalog endpoint.
///
/// Only the fields the viewer consumes are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub rating: Option<Rating>,

    // Display-only extras for the detail view
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub premiered: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub official_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
}

impl ShowRecord {
    #[cfg(test)]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            summary: None,
            genres: Vec::new(),
            image: None,
            rating: None,
            language: None,
            premiered: None,
            status: None,
            url: None,
            official_site: None,
        }
    }

    /// `rating.average` if the show has been rated.
    pub fn average_rating(&self) -> Option<f64> {
        self.rating.and_then(|r| r.average)
    }

    /// Rating used for ordering: unrated shows count as 0.
    pub fn sort_rating(&self) -> f64 {
        self.average_rating().unwrap_or(0.0)
    }

    pub fn medium_image(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.medium.as_deref())
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// The API sends `null` or partial dates for unreleased shows.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}
