//! Servo configuration table: declarative mapping rules for each actuator.
//!
//! A table entry names two landmarks, a measurement axis, and two ranges: the
//! expected span of the measured delta and the servo angle span it maps onto.
//! Tables come from the built-in defaults or from a text file in the rig's
//! table format.

use crate::landmarks::topology;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement axis for a servo's delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Absolute difference of the x components
    X,
    /// Absolute difference of the y components
    Y,
    /// 2D Euclidean distance between the points
    Distance,
}

impl Axis {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Distance => write!(f, "distance"),
        }
    }
}

/// One actuator's mapping rule.
///
/// `delta_min`/`delta_max` describe the measured span, `closed`/`open` the
/// angle span it maps onto. Either span may be reversed to invert direction.
/// `channel` is the command prefix selecting the controller board the pin
/// lives on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServoConfig {
    /// Landmark being measured
    pub source: String,
    /// Landmark the measurement is taken relative to
    pub reference: String,
    pub axis: Axis,
    pub pin: u8,
    /// Angle at `delta_min`
    pub closed: f64,
    /// Angle at `delta_max`
    pub open: f64,
    pub delta_min: f64,
    pub delta_max: f64,
    pub channel: String,
}

impl ServoConfig {
    #[allow(clippy::too_many_arguments)]
    fn entry(
        source: &str,
        reference: &str,
        axis: Axis,
        pin: u8,
        closed: f64,
        open: f64,
        delta_min: f64,
        delta_max: f64,
        channel: &str,
    ) -> Self {
        Self {
            source: source.to_string(),
            reference: reference.to_string(),
            axis,
            pin,
            closed,
            open,
            delta_min,
            delta_max,
            channel: channel.to_string(),
        }
    }
}

/// The rig's stock table: eyebrows, eyeball, eyelids, mouth corners.
///
/// Eyebrows and eyelids measure y relative to a fixed anchor, the eyeball
/// measures both axes against the eye's outer corner, and the mouth corners
/// measure 2D distance from the nose tip. Mouth servos live on the second
/// controller board.
pub fn default_table() -> Vec<ServoConfig> {
    use Axis::{Distance, X, Y};
    vec![
        ServoConfig::entry("leftEyebrow", "middleEyebrow", Y, 5, 70.0, 110.0, 0.021, 0.025, "servo_debug"),
        ServoConfig::entry("leftEyebrowCorner", "middleEyebrow", Y, 7, 90.0, 140.0, 0.022, 0.030, "servo_debug"),
        ServoConfig::entry("rightEyebrow", "middleEyebrow", Y, 4, 80.0, 50.0, 0.021, 0.025, "servo_debug"),
        ServoConfig::entry("rightEyebrowCorner", "middleEyebrow", Y, 6, 60.0, 110.0, 0.022, 0.030, "servo_debug"),
        ServoConfig::entry("leftEyeball", "leftEyeOuter", X, 2, 40.0, 118.0, -0.020, -0.012, "servo_debug"),
        ServoConfig::entry("leftEyeball", "leftEyeOuter", Y, 3, 90.0, 138.0, -0.010, -0.030, "servo_debug"),
        ServoConfig::entry("leftLowerEyelid", "leftUpperEyelid", Y, 11, 70.0, 12.0, 0.004, 0.016, "servo_debug"),
        ServoConfig::entry("leftUpperEyelid", "leftLowerEyelid", Y, 10, 50.0, 170.0, 0.004, 0.016, "servo_debug"),
        ServoConfig::entry("rightLowerEyelid", "rightUpperEyelid", Y, 13, 10.0, 50.0, 0.004, 0.016, "servo_debug"),
        ServoConfig::entry("rightUpperEyelid", "rightLowerEyelid", Y, 12, 160.0, 10.0, 0.004, 0.016, "servo_debug"),
        ServoConfig::entry("leftUpperMouth", "noseTip", Distance, 6, 75.0, 57.0, 0.064, 0.066, "slave_debug"),
        ServoConfig::entry("leftLowerMouth", "noseTip", Distance, 7, 70.0, 100.0, 0.117, 0.158, "slave_debug"),
        ServoConfig::entry("rightUpperMouth", "noseTip", Distance, 8, 100.0, 80.0, 0.068, 0.067, "slave_debug"),
        ServoConfig::entry("rightLowerMouth", "noseTip", Distance, 9, 110.0, 140.0, 0.119, 0.164, "slave_debug"),
    ]
}

/// Parse a servo table from its text format.
///
/// Records are separated by `;` or newlines; fields within a record are
/// whitespace-separated:
///
/// ```text
/// source reference axis pin closed open deltaMin deltaMax channel
/// ```
///
/// Blank records and `//` comment lines are skipped.
pub fn parse_table(input: &str) -> Result<Vec<ServoConfig>> {
    let mut table = Vec::new();

    for (number, record) in input.split(['\n', ';']).enumerate() {
        let record = record.trim();
        if record.is_empty() || record.starts_with("//") {
            continue;
        }

        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() != 9 {
            return Err(Error::Table(format!(
                "record {}: expected 9 fields, found {}: {record:?}",
                number + 1,
                fields.len()
            )));
        }

        let axis = Axis::parse(fields[2])
            .ok_or_else(|| Error::Table(format!("record {}: unknown axis {:?}", number + 1, fields[2])))?;

        let numeric = |field: &str, name: &str| -> Result<f64> {
            field
                .parse::<f64>()
                .map_err(|_| Error::Table(format!("record {}: invalid {name} {field:?}", number + 1)))
        };

        let pin = fields[3]
            .parse::<u8>()
            .map_err(|_| Error::Table(format!("record {}: invalid pin {:?}", number + 1, fields[3])))?;

        table.push(ServoConfig {
            source: fields[0].to_string(),
            reference: fields[1].to_string(),
            axis,
            pin,
            closed: numeric(fields[4], "closed angle")?,
            open: numeric(fields[5], "open angle")?,
            delta_min: numeric(fields[6], "deltaMin")?,
            delta_max: numeric(fields[7], "deltaMax")?,
            channel: fields[8].to_string(),
        });
    }

    Ok(table)
}

/// Validate a table: landmark names must resolve and input spans must not be
/// degenerate. Reversed spans are legal.
pub fn validate_table(table: &[ServoConfig]) -> Result<()> {
    for cfg in table {
        for name in [&cfg.source, &cfg.reference] {
            if topology::index_of(name).is_none() {
                return Err(Error::Table(format!(
                    "unknown landmark {name:?} (pin {} on {})",
                    cfg.pin, cfg.channel
                )));
            }
        }
        if cfg.delta_min == cfg.delta_max {
            return Err(Error::Table(format!(
                "degenerate delta range for pin {} on {}: {} == {}",
                cfg.pin, cfg.channel, cfg.delta_min, cfg.delta_max
            )));
        }
        if cfg.channel.is_empty() {
            return Err(Error::Table(format!("empty channel for pin {}", cfg.pin)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = default_table();
        assert_eq!(table.len(), 14);
        validate_table(&table).unwrap();
    }

    #[test]
    fn test_default_table_channels() {
        let table = default_table();
        assert_eq!(table.iter().filter(|c| c.channel == "servo_debug").count(), 10);
        assert_eq!(table.iter().filter(|c| c.channel == "slave_debug").count(), 4);
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!(Axis::parse("x"), Some(Axis::X));
        assert_eq!(Axis::parse("y"), Some(Axis::Y));
        assert_eq!(Axis::parse("distance"), Some(Axis::Distance));
        assert_eq!(Axis::parse("z"), None);
    }

    #[test]
    fn test_parse_single_record() {
        let table = parse_table("leftEyebrow middleEyebrow y 5 70 110 0.021 0.025 servo_debug").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].pin, 5);
        assert_eq!(table[0].axis, Axis::Y);
        assert_eq!(table[0].delta_max, 0.025);
    }

    #[test]
    fn test_parse_semicolon_separated() {
        let input = "noseTip upperLip y 1 0 90 0.0 0.1 servo_debug; noseTip lowerLip y 2 0 90 0.0 0.1 servo_debug";
        let table = parse_table(input).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].pin, 2);
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let input = "// eyebrow servos\n\nleftEyebrow middleEyebrow y 5 70 110 0.021 0.025 servo_debug\n;\n";
        let table = parse_table(input).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = parse_table("leftEyebrow middleEyebrow y 5 70 110").unwrap_err();
        assert!(err.to_string().contains("expected 9 fields"));
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse_table("leftEyebrow middleEyebrow y 5 seventy 110 0.021 0.025 servo_debug").unwrap_err();
        assert!(err.to_string().contains("closed angle"));
    }

    #[test]
    fn test_parse_bad_pin() {
        assert!(parse_table("leftEyebrow middleEyebrow y 300 70 110 0.021 0.025 servo_debug").is_err());
    }

    #[test]
    fn test_validate_unknown_landmark() {
        let mut table = default_table();
        table[0].source = "leftEar".to_string();
        assert!(validate_table(&table).is_err());
    }

    #[test]
    fn test_validate_degenerate_range() {
        let mut table = default_table();
        table[0].delta_max = table[0].delta_min;
        assert!(validate_table(&table).is_err());
    }
}
