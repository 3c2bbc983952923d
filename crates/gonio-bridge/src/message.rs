//! Host message envelopes
//!
//! Every message is a JSON object tagged by a `type` field. The tag
//! strings and field names are the host contract; changing them breaks
//! every embedding application.

use serde::{Deserialize, Serialize};

use gonio_core::{LandmarkFrame, TrackingUpdate};
use gonio_eval::FrameReport;

use crate::{BridgeError, BridgeResult};

/// Inbound command from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Replace configuration fields and, when `focusPoints` is present,
    /// the whole rule list.
    #[serde(rename = "SET_TRACKING")]
    SetTracking { data: TrackingUpdate },

    #[serde(rename = "START_CAMERA")]
    StartCamera,

    #[serde(rename = "STOP_CAMERA")]
    StopCamera,

    /// Suppress frame processing without tearing the session down.
    #[serde(rename = "PAUSE_TRACKING")]
    PauseTracking { pause: bool },
}

/// Outbound notification to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostNotification {
    /// Handshake: the engine is loaded and will start tracking.
    #[serde(rename = "WEBVIEW_LOADED")]
    Loaded,

    /// The selected per-frame evaluation result.
    #[serde(rename = "TRACKING_RESULT")]
    TrackingResult { data: FrameReport },

    /// The full raw landmark sequence, unmodified, for the host's own
    /// downstream processing.
    #[serde(rename = "POSE_DATA")]
    PoseData { data: LandmarkFrame },

    /// Camera or estimator failure, reported once, not retried.
    #[serde(rename = "CAMERA_ERROR")]
    CameraError { error: String },
}

/// Serialize an outbound notification to its JSON envelope.
pub fn encode_notification(notification: &HostNotification) -> BridgeResult<String> {
    serde_json::to_string(notification).map_err(BridgeError::from)
}

/// Parse an inbound command from its JSON envelope.
pub fn decode_command(raw: &str) -> BridgeResult<HostCommand> {
    serde_json::from_str(raw).map_err(BridgeError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonio_core::{Comparison, Landmark};

    #[test]
    fn test_decode_set_tracking() {
        let raw = r#"{
            "type": "SET_TRACKING",
            "data": {
                "angleTrue": 160,
                "condTrue": ">",
                "focusPoints": [
                    {"points": [11, 13, 15], "name": "left-elbow"}
                ]
            }
        }"#;

        let HostCommand::SetTracking { data } = decode_command(raw).unwrap() else {
            panic!("wrong command variant");
        };
        assert_eq!(data.angle_true, Some(160.0));
        assert_eq!(data.cond_true, Some(Comparison::GreaterThan));
        assert_eq!(data.focus_points.unwrap().len(), 1);
    }

    #[test]
    fn test_decode_lifecycle_commands() {
        assert_eq!(
            decode_command(r#"{"type":"START_CAMERA"}"#).unwrap(),
            HostCommand::StartCamera
        );
        assert_eq!(
            decode_command(r#"{"type":"STOP_CAMERA"}"#).unwrap(),
            HostCommand::StopCamera
        );
        assert_eq!(
            decode_command(r#"{"type":"PAUSE_TRACKING","pause":true}"#).unwrap(),
            HostCommand::PauseTracking { pause: true }
        );
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        assert!(decode_command(r#"{"type":"REBOOT"}"#).is_err());
        assert!(decode_command("not json").is_err());
    }

    #[test]
    fn test_encode_loaded_handshake() {
        let json = encode_notification(&HostNotification::Loaded).unwrap();
        assert_eq!(json, r#"{"type":"WEBVIEW_LOADED"}"#);
    }

    #[test]
    fn test_encode_tracking_result_envelope() {
        let report = FrameReport {
            conditions_met: true,
            angle: 160.5,
            threshold: 150.0,
            name: Some("elbow".to_string()),
            point_indices: Some([11, 13, 15]),
        };
        let json =
            encode_notification(&HostNotification::TrackingResult { data: report }).unwrap();

        assert!(json.contains(r#""type":"TRACKING_RESULT""#));
        assert!(json.contains(r#""conditionsMet":true"#));
        assert!(json.contains(r#""pointIndices":[11,13,15]"#));
    }

    #[test]
    fn test_encode_pose_data_passthrough() {
        let mut frame = LandmarkFrame::new();
        frame.set(0, Landmark::new(0.5, 0.5));
        let json = encode_notification(&HostNotification::PoseData { data: frame }).unwrap();

        assert!(json.contains(r#""type":"POSE_DATA""#));
        // Slot 0 present, slot 1 absent.
        assert!(json.contains(r#""data":[{"#));
        assert!(json.contains("null"));
    }

    #[test]
    fn test_encode_camera_error() {
        let json = encode_notification(&HostNotification::CameraError {
            error: "camera unavailable: device busy".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"CAMERA_ERROR""#));
        assert!(json.contains(r#""error":"camera unavailable: device busy""#));
    }
}
