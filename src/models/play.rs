use crate::core::time_dim;
use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One raw line of a play-log file, as loosely typed as the source itself.
///
/// Only the action marker (`page`) is required at parse time: non-play rows
/// (Login, Home, ...) legitimately carry nulls in most columns and are
/// filtered out before any field validation happens. Retained rows are
/// tightened into a [`PlayEvent`] via [`RawPlayRecord::into_event`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayRecord {
    pub page: String,
    pub ts: Option<i64>,
    #[serde(rename = "userId", default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<i64>,
    pub location: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
}

/// A fully validated play record: every field the fact and dimension rows
/// need, with the timestamp already converted from epoch milliseconds.
#[derive(Debug, Clone)]
pub struct PlayEvent {
    pub ts: DateTime<Utc>,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub level: String,
    pub song: String,
    pub artist: String,
    pub duration: f64,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}

/// Log exports are inconsistent about `userId`: some write `"26"`, some `26`.
/// Normalize both spellings to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "userId must be a string or number, got {}",
            other
        ))),
    }
}

impl RawPlayRecord {
    /// True when this record is a play action for the given marker.
    pub fn is_play(&self, marker: &str) -> bool {
        self.page == marker
    }

    /// Validate a retained record against the fixed field contract.
    /// Returns the reason on failure; the caller attaches file and line.
    pub fn into_event(self) -> Result<PlayEvent, String> {
        let ts_ms = self.ts.ok_or("missing field `ts`")?;
        let ts = time_dim::from_millis(ts_ms)
            .ok_or_else(|| format!("unrepresentable timestamp: {} ms", ts_ms))?;

        Ok(PlayEvent {
            ts,
            user_id: non_empty(self.user_id, "userId")?,
            first_name: self.first_name.ok_or("missing field `firstName`")?,
            last_name: self.last_name.ok_or("missing field `lastName`")?,
            gender: self.gender.ok_or("missing field `gender`")?,
            level: self.level.ok_or("missing field `level`")?,
            song: self.song.ok_or("missing field `song`")?,
            artist: self.artist.ok_or("missing field `artist`")?,
            duration: self.length.ok_or("missing field `length`")?,
            session_id: self.session_id.ok_or("missing field `sessionId`")?,
            location: self.location.ok_or("missing field `location`")?,
            user_agent: self.user_agent.ok_or("missing field `userAgent`")?,
        })
    }
}

fn non_empty(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("missing field `{}`", field)),
    }
}

impl PlayEvent {
    /// Column values for the `users` table, in declared insert order:
    /// `(user_id, first_name, last_name, gender, level)`.
    pub fn user_row(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.user_id,
            &self.first_name,
            &self.last_name,
            &self.gender,
            &self.level,
        )
    }
}
