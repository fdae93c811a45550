// Read operation: the fixed multi-module "get" query and its
// normalization into a `CameraInfo` record.
//
// The camera answers a "get" with module payloads as top-level siblings
// of `error_code`. Fields the firmware shapes consistently are typed;
// firmware-version-dependent submaps pass through as raw JSON.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::TapoClient;
use crate::error::Error;

/// Normalized device state from [`TapoClient::get_info`].
#[derive(Debug, Clone, Serialize)]
pub struct CameraInfo {
    /// `device_info.basic_info` as the firmware sent it.
    pub basic: Value,
    pub motion_detection: MotionDetection,
    /// Privacy mode: `true` when the lens mask is engaged.
    pub lens_mask: bool,
    /// On-screen-display configuration (`OSD` module), raw.
    pub osd: Value,
    /// `msg_alarm.chn1_msg_alarm_info`, raw.
    pub alarm: Value,
    pub led: bool,
    pub auto_track: bool,
    pub speaker: Value,
    pub microphone: Value,
    pub clock: ClockStatus,
    /// `motor.capability`, raw.
    pub motor: Value,
    pub presets: Vec<Preset>,
    /// `image.switch`, raw.
    pub image: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct MotionDetection {
    pub enabled: bool,
    pub enhanced: bool,
    pub sensitivity: String,
    pub digital_sensitivity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockStatus {
    /// Seconds since the Unix epoch, per the device clock.
    pub timestamp: i64,
    pub local_time: String,
}

/// One PTZ preset. The firmware reports presets as parallel string
/// arrays; normalization zips them into typed entries.
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub id: i64,
    pub name: String,
    pub read_only: bool,
    pub pan: f64,
    pub tilt: f64,
}

impl TapoClient {
    /// Query the full device state and normalize it.
    pub async fn get_info(&self) -> Result<CameraInfo, Error> {
        let query = json!({
            "method": "get",
            "device_info": { "name": ["basic_info"] },
            "motion_detection": { "name": ["motion_det"] },
            "lens_mask": { "name": ["lens_mask_info"] },
            "OSD": { "name": ["date", "week", "font"], "table": ["label_info"] },
            "msg_alarm": { "name": ["chn1_msg_alarm_info"] },
            "led": { "name": ["config"] },
            "target_track": { "name": ["target_track_info"] },
            "audio_capability": { "name": ["device_speaker", "device_microphone"] },
            "cet": { "name": ["vhttpd"] },
            "system": { "name": ["clock_status"] },
            "motor": { "name": ["capability"] },
            "preset": { "name": ["preset"] },
            "image": { "name": ["switch"] },
        });

        let body = self.execute(&query).await?;
        normalize(&body)
    }
}

/// Reshape a raw "get" response body into a [`CameraInfo`].
pub(crate) fn normalize(body: &Value) -> Result<CameraInfo, Error> {
    Ok(CameraInfo {
        basic: required(body, "/device_info/basic_info")?.clone(),
        motion_detection: MotionDetection {
            enabled: is_on(body, "/motion_detection/motion_det/enabled"),
            enhanced: is_on(body, "/motion_detection/motion_det/enhanced"),
            sensitivity: required(body, "/motion_detection/motion_det/sensitivity")?
                .as_str()
                .unwrap_or_default()
                .to_owned(),
            digital_sensitivity: int_field(
                body,
                "/motion_detection/motion_det/digital_sensitivity",
            )?,
        },
        lens_mask: is_on(body, "/lens_mask/lens_mask_info/enabled"),
        osd: required(body, "/OSD")?.clone(),
        alarm: required(body, "/msg_alarm/chn1_msg_alarm_info")?.clone(),
        led: is_on(body, "/led/config/enabled"),
        auto_track: is_on(body, "/target_track/target_track_info/enabled"),
        speaker: required(body, "/audio_capability/device_speaker")?.clone(),
        microphone: required(body, "/audio_capability/device_microphone")?.clone(),
        clock: ClockStatus {
            timestamp: int_field(body, "/system/clock_status/seconds_from_1970")?,
            local_time: required(body, "/system/clock_status/local_time")?
                .as_str()
                .unwrap_or_default()
                .to_owned(),
        },
        motor: required(body, "/motor/capability")?.clone(),
        presets: parse_presets(body)?,
        image: required(body, "/image/switch")?.clone(),
    })
}

/// Zip the preset parallel arrays (`id`, `name`, `read_only`,
/// `position_pan`, `position_tilt`) into typed entries.
///
/// A length mismatch or an unparsable element is a protocol error rather
/// than a silently defaulted entry.
fn parse_presets(body: &Value) -> Result<Vec<Preset>, Error> {
    let ids = string_array(body, "/preset/preset/id")?;
    let names = string_array(body, "/preset/preset/name")?;
    let read_only = string_array(body, "/preset/preset/read_only")?;
    let pans = string_array(body, "/preset/preset/position_pan")?;
    let tilts = string_array(body, "/preset/preset/position_tilt")?;

    let mut presets = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        let entry = |field: &[&str], name: &str| {
            field.get(i).copied().map(str::to_owned).ok_or_else(|| Error::Protocol {
                message: format!("preset array '{name}' shorter than 'id' (index {i})"),
                body: body.to_string(),
            })
        };

        presets.push(Preset {
            id: parse_num(id, "preset id", body)?,
            name: entry(&names, "name")?,
            read_only: entry(&read_only, "read_only")? != "0",
            pan: parse_num(&entry(&pans, "position_pan")?, "position_pan", body)?,
            tilt: parse_num(&entry(&tilts, "position_tilt")?, "position_tilt", body)?,
        });
    }
    Ok(presets)
}

// ── Field helpers ────────────────────────────────────────────────────

fn required<'v>(body: &'v Value, pointer: &str) -> Result<&'v Value, Error> {
    body.pointer(pointer).ok_or_else(|| Error::Protocol {
        message: format!("missing field {pointer}"),
        body: body.to_string(),
    })
}

/// `true` iff the field is the literal string `"on"`.
fn is_on(body: &Value, pointer: &str) -> bool {
    body.pointer(pointer).and_then(Value::as_str) == Some("on")
}

/// Integer field that the firmware may send as a number or a string.
fn int_field(body: &Value, pointer: &str) -> Result<i64, Error> {
    let value = required(body, pointer)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| Error::Protocol {
            message: format!("field {pointer} is not an integer"),
            body: body.to_string(),
        })
}

fn string_array<'v>(body: &'v Value, pointer: &str) -> Result<Vec<&'v str>, Error> {
    required(body, pointer)?
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .ok_or_else(|| Error::Protocol {
            message: format!("field {pointer} is not an array"),
            body: body.to_string(),
        })
}

fn parse_num<T: std::str::FromStr>(raw: &str, name: &str, body: &Value) -> Result<T, Error> {
    raw.parse().map_err(|_| Error::Protocol {
        message: format!("unparsable {name}: {raw:?}"),
        body: body.to_string(),
    })
}
