//! Segment partition and outcome resolution
//!
//! The wheel circle is split into N contiguous equal slices, built once
//! from config and read-only afterwards. Resolution answers "which slice
//! sits under the fixed pointer given the wheel's current rotation" - a
//! pure function, cheap enough to call every frame for live highlighting
//! and once at spin completion for the prize.

use glam::Vec2;
use serde::Serialize;
use std::f32::consts::TAU;

use crate::config::{ConfigError, WheelConfig};
use crate::{normalize_angle, polar_to_cartesian};

/// One slice of the wheel. Boundaries are native (rotation-zero) angles
/// in [0, 2π); `start_rad` is inclusive, `end_rad` exclusive.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub label: String,
    /// 0xRRGGBB
    pub color: u32,
    pub start_rad: f32,
    pub end_rad: f32,
}

impl Segment {
    /// Mid-angle of the slice at rotation zero
    pub fn center_angle(&self) -> f32 {
        self.start_rad + (self.end_rad - self.start_rad) / 2.0
    }
}

/// The segment resolved under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHit<'a> {
    pub index: usize,
    pub label: &'a str,
    pub color: u32,
}

/// Immutable partition of the circle plus the pointer it is read against.
#[derive(Debug, Clone)]
pub struct SegmentMap {
    segments: Vec<Segment>,
    /// Normalized to [0, 2π)
    pointer_angle: f32,
}

impl SegmentMap {
    /// Build equal-width segments from the wheel config. Boundaries are
    /// derived as `index * (2π/N)`, so together the slices span exactly
    /// one full turn.
    pub fn from_config(config: &WheelConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let span = TAU / config.segments.len() as f32;
        let segments = config
            .segments
            .iter()
            .enumerate()
            .map(|(index, def)| Segment {
                label: def.label.clone(),
                color: def.color,
                start_rad: index as f32 * span,
                end_rad: (index + 1) as f32 * span,
            })
            .collect();

        Ok(Self {
            segments,
            pointer_angle: normalize_angle(config.pointer_angle),
        })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction rejects empty wheels
        false
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn pointer_angle(&self) -> f32 {
        self.pointer_angle
    }

    /// Resolve the segment under the pointer for the given wheel rotation.
    ///
    /// Each segment's boundaries are rotated by `wheel_angle` and
    /// normalized; rotation can push an interval across the 0/2π seam, in
    /// which case membership is the union `[start, 2π) ∪ [0, end)`.
    pub fn segment_at(&self, wheel_angle: f32) -> SegmentHit<'_> {
        let pointer = self.pointer_angle;

        // A lone segment is the whole circle; its interval normalizes to
        // start == end, which the exclusive-end test would read as empty.
        if let [only] = self.segments.as_slice() {
            return SegmentHit {
                index: 0,
                label: &only.label,
                color: only.color,
            };
        }

        for (index, segment) in self.segments.iter().enumerate() {
            let start = normalize_angle(segment.start_rad + wheel_angle);
            let end = normalize_angle(segment.end_rad + wheel_angle);

            let contains = if start <= end {
                pointer >= start && pointer < end
            } else {
                // Rotation pushed the interval across the 0/2π seam
                pointer >= start || pointer < end
            };

            if contains {
                return SegmentHit {
                    index,
                    label: &segment.label,
                    color: segment.color,
                };
            }
        }

        // Float noise at a shared boundary can leave the pointer in no
        // interval; resolve deterministically to the first segment.
        log::warn!(
            "pointer {:.6} rad missed every segment at rotation {:.6}, falling back to 0",
            self.pointer_angle,
            wheel_angle
        );
        let first = &self.segments[0];
        SegmentHit {
            index: 0,
            label: &first.label,
            color: first.color,
        }
    }

    /// Anchor point for a segment's label at the given radius and wheel
    /// rotation, for rendering collaborators.
    pub fn label_anchor(&self, index: usize, radius: f32, wheel_angle: f32) -> Vec2 {
        let segment = &self.segments[index];
        polar_to_cartesian(radius, segment.center_angle() + wheel_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentConfig;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn eight_segment_map() -> SegmentMap {
        SegmentMap::from_config(&WheelConfig::default()).expect("valid config")
    }

    #[test]
    fn test_pointer_top_at_rest() {
        // Eight 45° slices, pointer at -90° (270° normalized). At rest the
        // pointer falls in [270°, 315°), which is slice 6.
        let map = eight_segment_map();
        let hit = map.segment_at(0.0);
        assert_eq!(hit.index, 6);
        assert_eq!(hit.label, "Prize 7");
    }

    #[test]
    fn test_rotation_shifts_winner() {
        let map = eight_segment_map();
        // Rotating the wheel forward one slice moves the previous slice
        // under the pointer.
        let hit = map.segment_at(TAU / 8.0);
        assert_eq!(hit.index, 5);
    }

    #[test]
    fn test_partition_covers_circle_in_order() {
        let map = eight_segment_map();
        let mut seen = vec![0usize; map.len()];
        let mut previous = map.segment_at(0.0).index;
        let mut transitions = Vec::new();

        let steps = 10_000;
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * TAU;
            let hit = map.segment_at(angle);
            assert!(hit.index < map.len());
            seen[hit.index] += 1;
            if hit.index != previous {
                transitions.push(hit.index);
                previous = hit.index;
            }
        }

        // Every slice appears
        assert!(seen.iter().all(|&count| count > 0));
        // Forward rotation walks the slices in descending wheel order
        for pair in transitions.windows(2) {
            let expected = (pair[0] + map.len() - 1) % map.len();
            assert_eq!(pair[1], expected);
        }
    }

    #[test]
    fn test_wraparound_segment_straddles_seam() {
        // Two half-circle slices with the pointer at 0. Rotate so slice 1
        // [π, 2π) straddles the seam: its interval becomes [3π/2, π/2).
        let config = WheelConfig {
            segments: vec![
                SegmentConfig::new("Left", 0x111111),
                SegmentConfig::new("Right", 0x222222),
            ],
            pointer_angle: 0.0,
        };
        let map = SegmentMap::from_config(&config).expect("valid config");

        let hit = map.segment_at(FRAC_PI_2);
        assert_eq!(hit.index, 1);
        // Pointer angles just either side of the seam resolve to the same
        // wrapped slice.
        let config_pointer_low = WheelConfig {
            pointer_angle: 0.01,
            ..config.clone()
        };
        let config_pointer_high = WheelConfig {
            pointer_angle: TAU - 0.01,
            ..config
        };
        let low = SegmentMap::from_config(&config_pointer_low).expect("valid config");
        let high = SegmentMap::from_config(&config_pointer_high).expect("valid config");
        assert_eq!(low.segment_at(FRAC_PI_2).index, 1);
        assert_eq!(high.segment_at(FRAC_PI_2).index, 1);
    }

    #[test]
    fn test_single_segment_always_wins() {
        let config = WheelConfig::new(vec![SegmentConfig::new("Everything", 0xABCDEF)]);
        let map = SegmentMap::from_config(&config).expect("valid config");
        for i in 0..32 {
            let hit = map.segment_at(i as f32 * 0.37);
            assert_eq!(hit.index, 0);
        }
    }

    #[test]
    fn test_label_anchor_points_at_slice_center() {
        let map = eight_segment_map();
        // Slice 0 spans [0°, 45°); its center at rotation zero is 22.5°.
        let anchor = map.label_anchor(0, 2.0, 0.0);
        let expected = polar_to_cartesian(2.0, PI / 8.0);
        assert!((anchor - expected).length() < 1e-5);
    }

    #[test]
    fn test_empty_wheel_rejected() {
        let err = SegmentMap::from_config(&WheelConfig::new(Vec::new()));
        assert!(err.is_err());
    }
}
