// Write operations: typed "set" and "do" controls.
//
// Each control maps deterministically to one module-scoped envelope
// fragment. The closed enums replace the original firmware client's
// string-keyed dispatch table, so an unhandled control is a compile
// error instead of a runtime lookup miss.

use serde_json::{json, Map, Value};

use crate::client::TapoClient;
use crate::error::Error;

/// A named high-level "set" control and its value.
#[derive(Debug, Clone)]
pub enum SetControl {
    Osd(OsdSettings),
    /// Lens mask on/off.
    PrivacyMode(bool),
    Alarm(AlarmSettings),
    Led(bool),
    DayNightMode(DayNightMode),
    MotionDetection(bool),
    AutoTrackTarget(bool),
    LensDistortionCorrection(bool),
    /// `true` flips the image around its center.
    ImageFlipVertical(bool),
}

/// On-screen-display layout. Font settings are fixed by the firmware
/// defaults the official app sends.
#[derive(Debug, Clone)]
pub struct OsdSettings {
    pub date: OsdElement,
    pub week: OsdElement,
    pub label: OsdElement,
}

#[derive(Debug, Clone)]
pub struct OsdElement {
    pub enabled: bool,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone)]
pub struct AlarmSettings {
    pub enabled: bool,
    /// Alarm channels to trigger, e.g. `["sound", "light"]`.
    pub modes: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum DayNightMode {
    Auto,
    On,
    Off,
}

impl DayNightMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

/// A named "do" action and its value.
#[derive(Debug, Clone)]
pub enum DoControl {
    /// Absolute motor move to coordinates.
    MoveMotor { x: i64, y: i64 },
    /// Step the motor in a direction (degrees).
    MoveMotorStep { direction: i64 },
    CalibrateMotor,
    /// Format the SD card.
    Format,
    /// Reboot sends the same harddisk_manage payload as Format; kept
    /// from the observed wire behavior of the official client.
    Reboot,
    SavePreset { name: String },
    DeletePreset { id: i64 },
    GotoPreset { id: i64 },
}

impl SetControl {
    /// The module fragment this control contributes to a "set" envelope.
    pub(crate) fn fragment(&self) -> Value {
        match self {
            Self::Osd(osd) => json!({ "OSD": {
                "date": {
                    "enabled": on_off(osd.date.enabled),
                    "x_coor": osd.date.x,
                    "y_coor": osd.date.y,
                },
                "week": {
                    "enabled": on_off(osd.week.enabled),
                    "x_coor": osd.week.x,
                    "y_coor": osd.week.y,
                },
                "font": {
                    "color": "white",
                    "color_type": "auto",
                    "display": "ntnb",
                    "size": "auto",
                },
                "label_info_1": {
                    "enabled": on_off(osd.label.enabled),
                    "x_coor": osd.label.x,
                    "y_coor": osd.label.y,
                },
            }}),
            Self::PrivacyMode(on) => {
                json!({ "lens_mask": { "lens_mask_info": { "enabled": on_off(*on) } } })
            }
            Self::Alarm(alarm) => json!({ "msg_alarm": { "chn1_msg_alarm_info": {
                "alarm_type": "0",
                "enabled": on_off(alarm.enabled),
                "light_type": "0",
                "alarm_mode": alarm.modes,
            }}}),
            Self::Led(on) => json!({ "led": { "config": { "enabled": on_off(*on) } } }),
            Self::DayNightMode(mode) => {
                json!({ "image": { "common": { "inf_type": mode.as_str() } } })
            }
            Self::MotionDetection(on) => {
                json!({ "motion_detection": { "motion_det": { "enabled": on_off(*on) } } })
            }
            Self::AutoTrackTarget(on) => {
                json!({ "target_track": { "target_track_info": { "enabled": on_off(*on) } } })
            }
            Self::LensDistortionCorrection(on) => {
                json!({ "image": { "switch": { "ldc": on_off(*on) } } })
            }
            Self::ImageFlipVertical(on) => {
                json!({ "image": { "switch": { "flip_type": if *on { "center" } else { "off" } } } })
            }
        }
    }
}

impl DoControl {
    /// The module fragment this action contributes to a "do" envelope.
    pub(crate) fn fragment(&self) -> Value {
        match self {
            Self::MoveMotor { x, y } => {
                json!({ "motor": { "move": { "x_coord": x, "y_coord": y } } })
            }
            Self::MoveMotorStep { direction } => {
                json!({ "motor": { "movestep": { "direction": direction } } })
            }
            Self::CalibrateMotor => json!({ "motor": { "manual_cali": "" } }),
            Self::Format | Self::Reboot => {
                json!({ "harddisk_manage": { "format_hd": "1" } })
            }
            Self::SavePreset { name } => {
                json!({ "preset": { "name": name, "save_ptz": "1" } })
            }
            Self::DeletePreset { id } => {
                json!({ "preset": { "remove_preset": { "id": [id] } } })
            }
            Self::GotoPreset { id } => json!({ "preset": { "goto_preset": { "id": id } } }),
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Merge control fragments into one `{ method, ... }` envelope.
///
/// Fragments merge shallowly at the module level: two controls that
/// address the same module overwrite each other, matching the original
/// client's behavior.
fn build_envelope(method: &str, fragments: impl Iterator<Item = Value>) -> Value {
    let mut envelope = Map::new();
    envelope.insert("method".into(), Value::String(method.into()));
    for fragment in fragments {
        if let Value::Object(modules) = fragment {
            envelope.extend(modules);
        }
    }
    Value::Object(envelope)
}

impl TapoClient {
    /// Apply one or more "set" controls in a single request.
    pub async fn set(&self, controls: &[SetControl]) -> Result<Value, Error> {
        let envelope = build_envelope("set", controls.iter().map(SetControl::fragment));
        self.execute(&envelope).await
    }

    /// Run one or more "do" actions in a single request.
    pub async fn perform(&self, actions: &[DoControl]) -> Result<Value, Error> {
        let envelope = build_envelope("do", actions.iter().map(DoControl::fragment));
        self.execute(&envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn led_envelope_round_trip() {
        let on = build_envelope("set", [SetControl::Led(true).fragment()].into_iter());
        assert_eq!(on, json!({ "method": "set", "led": { "config": { "enabled": "on" } } }));

        let off = build_envelope("set", [SetControl::Led(false).fragment()].into_iter());
        assert_eq!(off, json!({ "method": "set", "led": { "config": { "enabled": "off" } } }));
    }

    #[test]
    fn privacy_mode_addresses_the_lens_mask_module() {
        let fragment = SetControl::PrivacyMode(true).fragment();
        assert_eq!(fragment["lens_mask"]["lens_mask_info"]["enabled"], "on");
    }

    #[test]
    fn multiple_controls_merge_into_one_envelope() {
        let envelope = build_envelope(
            "set",
            [
                SetControl::Led(true).fragment(),
                SetControl::MotionDetection(false).fragment(),
            ]
            .into_iter(),
        );
        assert_eq!(envelope["method"], "set");
        assert_eq!(envelope["led"]["config"]["enabled"], "on");
        assert_eq!(envelope["motion_detection"]["motion_det"]["enabled"], "off");
    }

    #[test]
    fn flip_uses_center_not_on() {
        let fragment = SetControl::ImageFlipVertical(true).fragment();
        assert_eq!(fragment["image"]["switch"]["flip_type"], "center");
    }

    #[test]
    fn reboot_and_format_share_a_payload() {
        assert_eq!(DoControl::Reboot.fragment(), DoControl::Format.fragment());
        assert_eq!(
            DoControl::Format.fragment(),
            json!({ "harddisk_manage": { "format_hd": "1" } })
        );
    }

    #[test]
    fn preset_actions() {
        assert_eq!(
            DoControl::SavePreset { name: "Gate".into() }.fragment(),
            json!({ "preset": { "name": "Gate", "save_ptz": "1" } })
        );
        assert_eq!(
            DoControl::DeletePreset { id: 3 }.fragment(),
            json!({ "preset": { "remove_preset": { "id": [3] } } })
        );
        assert_eq!(
            DoControl::GotoPreset { id: 1 }.fragment(),
            json!({ "preset": { "goto_preset": { "id": 1 } } })
        );
    }

    #[test]
    fn alarm_fragment_carries_modes() {
        let fragment = SetControl::Alarm(AlarmSettings {
            enabled: true,
            modes: vec!["sound".into(), "light".into()],
        })
        .fragment();
        let info = &fragment["msg_alarm"]["chn1_msg_alarm_info"];
        assert_eq!(info["enabled"], "on");
        assert_eq!(info["alarm_mode"], json!(["sound", "light"]));
    }

    #[test]
    fn osd_fragment_places_all_three_elements() {
        let element = |enabled| OsdElement { enabled, x: 10, y: 20 };
        let fragment = SetControl::Osd(OsdSettings {
            date: element(true),
            week: element(false),
            label: element(true),
        })
        .fragment();
        assert_eq!(fragment["OSD"]["date"]["enabled"], "on");
        assert_eq!(fragment["OSD"]["week"]["enabled"], "off");
        assert_eq!(fragment["OSD"]["label_info_1"]["x_coor"], 10);
        assert_eq!(fragment["OSD"]["font"]["display"], "ntnb");
    }

    #[test]
    fn day_night_modes() {
        let auto = SetControl::DayNightMode(DayNightMode::Auto).fragment();
        assert_eq!(auto["image"]["common"]["inf_type"], "auto");
    }
}
