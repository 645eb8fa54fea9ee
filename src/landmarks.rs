//! Facial landmark types and the face mesh topology.
//!
//! Frames arrive from an external detector as sets of normalized points
//! indexed by the MediaPipe face mesh topology (468 points, or 478 with iris
//! refinement). This module owns the point types, the named indices the servo
//! table refers to, and the JSON frame decoding at the process boundary.

use crate::constants::NUM_FACE_LANDMARKS;
use crate::Result;
use serde::Deserialize;

/// A single detected landmark in normalized image coordinates.
///
/// `x` and `y` are in `[0, 1]` relative to the frame; `z` is a relative depth
/// with roughly the same scale as `x`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component along the given measurement axis (`x` or `y`)
    pub fn axis_value(&self, horizontal: bool) -> f64 {
        if horizontal {
            self.x
        } else {
            self.y
        }
    }
}

/// Wire format for a landmark: either a `[x, y, z]` triple or an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLandmark {
    Triple([f64; 3]),
    Object {
        x: f64,
        y: f64,
        #[serde(default)]
        z: f64,
    },
}

impl From<RawLandmark> for Landmark {
    fn from(raw: RawLandmark) -> Self {
        match raw {
            RawLandmark::Triple([x, y, z]) => Self { x, y, z },
            RawLandmark::Object { x, y, z } => Self { x, y, z },
        }
    }
}

/// One detection result: the landmark set for a single face.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    points: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Decode a frame from one JSON line (array of triples or objects)
    pub fn from_json(line: &str) -> Result<Self> {
        let raw: Vec<RawLandmark> = serde_json::from_str(line)?;
        Ok(Self {
            points: raw.into_iter().map(Landmark::from).collect(),
        })
    }

    /// Whether the frame carries a full face mesh.
    ///
    /// Iris points (indices 468..478) are optional; servo entries that
    /// reference them are skipped individually when absent.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= NUM_FACE_LANDMARKS
    }

    /// Landmark at a topology index, `None` when out of range
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Named indices into the face mesh topology.
///
/// These are the points the servo table can reference by name. The set covers
/// the rig's actuated features plus the anchors used as measurement
/// references.
pub mod topology {
    pub const LEFT_EYEBROW: usize = 336;
    pub const LEFT_EYEBROW_CORNER: usize = 300;
    pub const RIGHT_EYEBROW: usize = 107;
    pub const RIGHT_EYEBROW_CORNER: usize = 70;
    pub const MIDDLE_EYEBROW: usize = 8;

    pub const LEFT_EYEBALL: usize = 473;
    pub const LEFT_EYE_OUTER: usize = 263;
    pub const RIGHT_EYE_OUTER: usize = 33;

    pub const LEFT_UPPER_EYELID: usize = 386;
    pub const LEFT_LOWER_EYELID: usize = 374;
    pub const RIGHT_UPPER_EYELID: usize = 159;
    pub const RIGHT_LOWER_EYELID: usize = 145;

    pub const LEFT_UPPER_MOUTH: usize = 391;
    pub const LEFT_LOWER_MOUTH: usize = 335;
    pub const RIGHT_UPPER_MOUTH: usize = 163;
    pub const RIGHT_LOWER_MOUTH: usize = 106;

    pub const NOSE_TIP: usize = 4;
    pub const UPPER_LIP: usize = 11;
    pub const LOWER_LIP: usize = 16;

    /// Resolve a landmark name as used in servo tables to its mesh index
    pub fn index_of(name: &str) -> Option<usize> {
        let index = match name {
            "leftEyebrow" => LEFT_EYEBROW,
            "leftEyebrowCorner" => LEFT_EYEBROW_CORNER,
            "rightEyebrow" => RIGHT_EYEBROW,
            "rightEyebrowCorner" => RIGHT_EYEBROW_CORNER,
            "middleEyebrow" => MIDDLE_EYEBROW,
            "leftEyeball" => LEFT_EYEBALL,
            "leftEyeOuter" => LEFT_EYE_OUTER,
            "rightEyeOuter" => RIGHT_EYE_OUTER,
            "leftUpperEyelid" => LEFT_UPPER_EYELID,
            "leftLowerEyelid" => LEFT_LOWER_EYELID,
            "rightUpperEyelid" => RIGHT_UPPER_EYELID,
            "rightLowerEyelid" => RIGHT_LOWER_EYELID,
            "leftUpperMouth" => LEFT_UPPER_MOUTH,
            "leftLowerMouth" => LEFT_LOWER_MOUTH,
            "rightUpperMouth" => RIGHT_UPPER_MOUTH,
            "rightLowerMouth" => RIGHT_LOWER_MOUTH,
            "noseTip" => NOSE_TIP,
            "upperLip" => UPPER_LIP,
            "lowerLip" => LOWER_LIP,
            _ => return None,
        };
        Some(index)
    }
}
