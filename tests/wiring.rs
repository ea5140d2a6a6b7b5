//! Host-level tests for the logical-to-physical transform.

use std::collections::HashSet;

use pikaled::wiring::{Segment, WiringConfig};
use pikaled::Error;

fn assert_bijection(wiring: &WiringConfig) {
    let (width, height) = wiring.logical_size();
    let (physical_width, physical_height) = wiring.physical_size();
    let mut seen = HashSet::new();
    for y in 0..height {
        for x in 0..width {
            let (px, py) = wiring.transform(x, y).unwrap();
            assert!(px < physical_width && py < physical_height);
            assert!(seen.insert((px, py)), "({}, {}) mapped twice", px, py);
        }
    }
    assert_eq!(seen.len(), physical_width * physical_height);
}

#[test]
fn pikaled_wiring_is_a_bijection() {
    assert_bijection(&WiringConfig::pikaled());
}

#[test]
fn identity_wiring_is_a_bijection() {
    assert_bijection(&WiringConfig::identity(12, 5).unwrap());
}

#[test]
fn out_of_range_is_an_error_not_a_clamp() {
    let wiring = WiringConfig::pikaled();
    assert!(matches!(
        wiring.transform(192, 0),
        Err(Error::OutOfRange { x: 192, y: 0, width: 192, height: 48 })
    ));
    assert!(matches!(wiring.transform(0, 48), Err(Error::OutOfRange { .. })));
}

#[test]
fn historical_overlapping_table_is_rejected() {
    // Middle third of the second band starting at row 63 overlaps the
    // first third of that band.
    let result = WiringConfig::new(
        (192, 48),
        (64, 144),
        vec![
            vec![Segment::flipped(0, 32), Segment::straight(0, 16), Segment::flipped(0, 0)],
            vec![Segment::flipped(0, 48), Segment::straight(0, 63), Segment::flipped(0, 80)],
            vec![Segment::flipped(0, 96), Segment::straight(0, 112), Segment::flipped(0, 128)],
        ],
    );
    assert!(matches!(result, Err(Error::InvalidWiring(_))));
}

#[test]
fn one_band_mirror_flag_changes_only_that_band() {
    let base = WiringConfig::pikaled();
    let table: pikaled::wiring::WiringTable = base.clone().into();
    let mut segments = table.segments.clone();
    for segment in &mut segments[1] {
        segment.mirror_y = !segment.mirror_y;
    }
    let changed = WiringConfig::new(table.logical, table.physical, segments).unwrap();
    assert_bijection(&changed);

    for y in 0..48 {
        for x in 0..192 {
            let before = base.transform(x, y).unwrap();
            let after = changed.transform(x, y).unwrap();
            if (16..32).contains(&y) {
                assert_ne!(before, after, "({}, {})", x, y);
            } else {
                assert_eq!(before, after, "({}, {})", x, y);
            }
        }
    }
}

#[test]
fn wiring_round_trips_through_json() {
    let json = serde_json::to_string(&WiringConfig::pikaled()).unwrap();
    let loaded: WiringConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, WiringConfig::pikaled());
}
