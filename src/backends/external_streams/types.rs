use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::constants::RESOLVE_STATUS_OK;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalStreamsResponse {
    pub strms: Vec<ExternalStream>,
}

/// A candidate stream offered by the service.
///
/// Every field is defaulted and decoded leniently so one oddly shaped entry
/// never fails the listing. `notifications` and `subs` change shape between
/// responses and are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalStream {
    #[serde(deserialize_with = "label")]
    pub title: String,
    #[serde(deserialize_with = "label")]
    pub provider: String,
    #[serde(deserialize_with = "label")]
    pub quality: String,
    #[serde(deserialize_with = "label")]
    pub lang: String,
    #[serde(deserialize_with = "label")]
    pub ainfo: String,
    #[serde(deserialize_with = "label")]
    pub vinfo: String,
    #[serde(deserialize_with = "label")]
    pub url: String,
    #[serde(deserialize_with = "label")]
    pub size: String,
    #[serde(deserialize_with = "label")]
    pub id: String,
    #[serde(deserialize_with = "label")]
    pub sid: String,
    /// Subtitles available
    #[serde(deserialize_with = "flag")]
    pub sinfo: bool,
    /// Subtitle language codes
    #[serde(deserialize_with = "lenient_or_default")]
    pub linfo: Vec<String>,
    #[serde(deserialize_with = "label")]
    pub bitrate: String,
    #[serde(deserialize_with = "label")]
    pub filename: String,
    #[serde(deserialize_with = "optional_label")]
    pub episode: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub stream_info: Option<StreamInfo>,
    pub notifications: Option<Value>,
    pub subs: Option<Value>,
    #[serde(deserialize_with = "lenient_or_default")]
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamInfo {
    #[serde(deserialize_with = "lenient")]
    pub video: Option<VideoInfo>,
    #[serde(deserialize_with = "lenient")]
    pub audio: Option<AudioInfo>,
    #[serde(deserialize_with = "optional_label")]
    pub filename: Option<String>,
    /// Track count per language code
    #[serde(deserialize_with = "lenient")]
    pub langs: Option<HashMap<String, i64>>,
    // Nested lists like [["lc", 2, "CZ"]]
    pub streams: Option<Value>,
    #[serde(rename = "HEVC", deserialize_with = "lenient")]
    pub hevc: Option<i64>,
    // Integer or fractional frame rate
    pub fps: Option<Value>,
    #[serde(deserialize_with = "optional_label")]
    pub fvideo: Option<String>,
    #[serde(deserialize_with = "optional_label")]
    pub faudio: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub flags: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    #[serde(deserialize_with = "optional_label")]
    pub codec: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub width: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub height: Option<i64>,
    #[serde(deserialize_with = "optional_label")]
    pub aspect: Option<String>,
    #[serde(deserialize_with = "optional_label")]
    pub ratio: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioInfo {
    #[serde(deserialize_with = "optional_label")]
    pub codec: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub channels: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub status: String,
    #[serde(default)]
    pub sc_id: Option<String>,
    #[serde(default)]
    pub stream_index: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ResolveResponse {
    /// The final URL, only when the service reported success and sent one.
    pub fn playable_url(&self) -> Option<&str> {
        if self.status == RESOLVE_STATUS_OK {
            self.url.as_deref()
        } else {
            None
        }
    }
}

/// Like [`lenient`] for fields that are not optional: mismatches and `null`
/// become the default.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Short text labels. Scalars are kept in their JSON text form.
fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_label(deserializer)?.unwrap_or_default())
}

fn optional_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Booleans, also accepting 0/1 style numbers.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// Decode a typed optional field, dropping values whose shape does not match
/// instead of failing the whole payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
