//! Per-frame flight state fed into the panel.
//!
//! A [`StateSnapshot`] is keyed by panel name (`airspeed`, `altimeter`, ...).
//! Every field is optional: a missing key leaves that gauge untouched, and
//! within a payload a missing field leaves that value untouched.

use serde::{Deserialize, Serialize};

/// Panel keys, in the order the default layout registers them.
pub mod keys {
    pub const AIRSPEED: &str = "airspeed";
    pub const ATTITUDE: &str = "attitude";
    pub const ALTIMETER: &str = "altimeter";
    pub const TURN_INDICATOR: &str = "turnIndicator";
    pub const HEADING: &str = "heading";
    pub const MAGNETIC_COMPASS: &str = "magneticCompass";
    pub const VSI: &str = "vsi";
    pub const VOR: &str = "vor";
    pub const NDB: &str = "ndb";
    pub const RADIO: &str = "radio";
}

/// Altimeter payload: a bare altitude or an object with optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AltimeterInput {
    Altitude(f64),
    Setting {
        #[serde(default)]
        altitude: Option<f64>,
        #[serde(default)]
        pressure: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttitudeInput {
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TurnInput {
    pub turn_rate: Option<f64>,
    pub slip_skid: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VorInput {
    pub course: Option<f64>,
    pub bearing: Option<f64>,
    pub deviation: Option<f64>,
    pub from_flag: Option<bool>,
    pub is_valid: Option<bool>,
}

/// NDB payload: a bare bearing or an object with optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NdbInput {
    Bearing(f64),
    Full {
        #[serde(default)]
        bearing: Option<f64>,
        #[serde(default)]
        heading: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioInput {
    pub active_freq: Option<f64>,
    pub standby_freq: Option<f64>,
    pub active_nav_freq: Option<f64>,
    pub standby_nav_freq: Option<f64>,
}

/// The payload handed to a single gauge's `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    Altimeter(AltimeterInput),
    Attitude(AttitudeInput),
    Turn(TurnInput),
    Vor(VorInput),
    Ndb(NdbInput),
    Radio(RadioInput),
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Reading::Value(value)
    }
}

impl From<AltimeterInput> for Reading {
    fn from(input: AltimeterInput) -> Self {
        Reading::Altimeter(input)
    }
}

impl From<AttitudeInput> for Reading {
    fn from(input: AttitudeInput) -> Self {
        Reading::Attitude(input)
    }
}

impl From<TurnInput> for Reading {
    fn from(input: TurnInput) -> Self {
        Reading::Turn(input)
    }
}

impl From<VorInput> for Reading {
    fn from(input: VorInput) -> Self {
        Reading::Vor(input)
    }
}

impl From<NdbInput> for Reading {
    fn from(input: NdbInput) -> Self {
        Reading::Ndb(input)
    }
}

impl From<RadioInput> for Reading {
    fn from(input: RadioInput) -> Self {
        Reading::Radio(input)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateSnapshot {
    pub airspeed: Option<f64>,
    pub attitude: Option<AttitudeInput>,
    pub altimeter: Option<AltimeterInput>,
    pub turn_indicator: Option<TurnInput>,
    pub heading: Option<f64>,
    pub magnetic_compass: Option<f64>,
    pub vsi: Option<f64>,
    pub vor: Option<VorInput>,
    pub ndb: Option<NdbInput>,
    pub radio: Option<RadioInput>,
}

impl StateSnapshot {
    /// The payload stored under panel key `name`, if any.
    pub fn reading(&self, name: &str) -> Option<Reading> {
        match name {
            keys::AIRSPEED => self.airspeed.map(Reading::from),
            keys::ATTITUDE => self.attitude.map(Reading::from),
            keys::ALTIMETER => self.altimeter.map(Reading::from),
            keys::TURN_INDICATOR => self.turn_indicator.map(Reading::from),
            keys::HEADING => self.heading.map(Reading::from),
            keys::MAGNETIC_COMPASS => self.magnetic_compass.map(Reading::from),
            keys::VSI => self.vsi.map(Reading::from),
            keys::VOR => self.vor.map(Reading::from),
            keys::NDB => self.ndb.map(Reading::from),
            keys::RADIO => self.radio.map(Reading::from),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_and_ignores_unknown_keys() {
        let snapshot: StateSnapshot = serde_json::from_str(
            r#"{
                "airspeed": 120.5,
                "turnIndicator": { "turnRate": 3, "slipSkid": -0.2 },
                "magneticCompass": 270,
                "flaps": 10
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.airspeed, Some(120.5));
        assert_eq!(snapshot.magnetic_compass, Some(270.0));
        assert_eq!(
            snapshot.turn_indicator,
            Some(TurnInput {
                turn_rate: Some(3.0),
                slip_skid: Some(-0.2),
            })
        );
        assert_eq!(snapshot.reading("flaps"), None);
    }

    #[test]
    fn altimeter_accepts_number_or_object() {
        let bare: StateSnapshot = serde_json::from_str(r#"{ "altimeter": 4500 }"#).unwrap();
        assert_eq!(bare.altimeter, Some(AltimeterInput::Altitude(4500.0)));

        let object: StateSnapshot =
            serde_json::from_str(r#"{ "altimeter": { "pressure": 30.1 } }"#).unwrap();
        assert_eq!(
            object.altimeter,
            Some(AltimeterInput::Setting {
                altitude: None,
                pressure: Some(30.1),
            })
        );
    }

    #[test]
    fn reading_resolves_panel_keys() {
        let snapshot = StateSnapshot {
            heading: Some(90.0),
            ndb: Some(NdbInput::Bearing(45.0)),
            ..Default::default()
        };
        assert_eq!(snapshot.reading(keys::HEADING), Some(Reading::Value(90.0)));
        assert_eq!(
            snapshot.reading(keys::NDB),
            Some(Reading::Ndb(NdbInput::Bearing(45.0)))
        );
        assert_eq!(snapshot.reading(keys::AIRSPEED), None);
    }
}
