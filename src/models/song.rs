use serde::{Deserialize, Deserializer};

/// One catalog source file: a single flat JSON object describing a song and
/// the artist that owns it. Field names are the exact, case-sensitive keys
/// of the source format.
///
/// Every field listed here must be present in the file; the nullable ones may
/// carry `null` but may not be omitted. A missing key fails the whole file.
#[derive(Debug, Clone, Deserialize)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    #[serde(deserialize_with = "required_nullable")]
    pub year: Option<i64>,
    pub duration: f64,
    pub artist_name: String,
    #[serde(deserialize_with = "required_nullable")]
    pub artist_location: Option<String>,
    #[serde(deserialize_with = "required_nullable")]
    pub artist_latitude: Option<f64>,
    #[serde(deserialize_with = "required_nullable")]
    pub artist_longitude: Option<f64>,
}

/// Serde treats plain `Option` fields as omittable. Routing them through an
/// explicit deserializer keeps the key required while still accepting `null`.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::deserialize(deserializer)
}

impl SongRecord {
    /// Column values for the `songs` table, in declared insert order:
    /// `(song_id, title, artist_id, year, duration)`.
    pub fn song_row(&self) -> (&str, &str, &str, Option<i64>, f64) {
        (
            &self.song_id,
            &self.title,
            &self.artist_id,
            self.year,
            self.duration,
        )
    }

    /// Column values for the `artists` table, in declared insert order:
    /// `(artist_id, name, location, latitude, longitude)`.
    pub fn artist_row(&self) -> (&str, &str, Option<&str>, Option<f64>, Option<f64>) {
        (
            &self.artist_id,
            &self.artist_name,
            self.artist_location.as_deref(),
            self.artist_latitude,
            self.artist_longitude,
        )
    }
}
