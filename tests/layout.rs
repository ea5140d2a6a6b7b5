//! Host-level tests for the slot layout table.

use pikaled::layout::{LayoutTable, Placement};
use pikaled::Error;

#[test]
fn pikaled_slots_match_expected() {
    let layout = LayoutTable::pikaled();
    assert_eq!(layout.tachi_size(), 9);
    assert_eq!(
        layout.placement(0, 0).unwrap(),
        Placement { anchor_x: 11 * 16, anchor_y: 0, rotated: true }
    );
    assert_eq!(
        layout.placement(1, 0).unwrap(),
        Placement { anchor_x: 4 * 16, anchor_y: 0, rotated: false }
    );
    assert_eq!(
        layout.placement(2, 3).unwrap(),
        Placement { anchor_x: 0, anchor_y: 0, rotated: true }
    );
    assert_eq!(
        layout.placement(4, 3).unwrap(),
        Placement { anchor_x: 7 * 16, anchor_y: 16, rotated: false }
    );
    assert_eq!(
        layout.placement(8, 1).unwrap(),
        Placement { anchor_x: 10 * 16, anchor_y: 32, rotated: true }
    );
}

#[test]
fn far_facing_arrows_count_towards_the_line() {
    let layout = LayoutTable::pikaled();
    let xs: Vec<_> = (0..4)
        .map(|arrow| layout.placement(5, arrow).unwrap().anchor_x / 16)
        .collect();
    assert_eq!(xs, [11, 10, 9, 8]);
}

#[test]
fn pikaled_layout_fills_the_grid_exactly() {
    let layout = LayoutTable::pikaled();
    layout.check_fits(192, 48).unwrap();
    assert!(matches!(layout.check_fits(176, 48), Err(Error::InvalidLayout(_))));
}

#[test]
fn invalid_slots_are_rejected() {
    let layout = LayoutTable::pikaled();
    assert!(matches!(
        layout.placement(9, 0),
        Err(Error::InvalidSlot { participant: 9, arrow: 0 })
    ));
    assert!(matches!(
        layout.placement(0, 4),
        Err(Error::InvalidSlot { participant: 0, arrow: 4 })
    ));
}

#[test]
fn layout_loads_from_json() {
    let json = r#"{"cell_width": 8, "cell_height": 8, "arrows": 2,
                   "slots": [{"row": 0, "column": 0}, {"row": 0, "column": 2, "rotated": true}]}"#;
    let layout: LayoutTable = serde_json::from_str(json).unwrap();
    assert_eq!(layout.tachi_size(), 2);
    assert_eq!(
        layout.placement(1, 0).unwrap(),
        Placement { anchor_x: 24, anchor_y: 0, rotated: true }
    );
}

#[test]
fn overlapping_slots_are_rejected() {
    let json = r#"{"cell_width": 8, "cell_height": 8, "arrows": 2,
                   "slots": [{"row": 0, "column": 0}, {"row": 0, "column": 1}]}"#;
    let layout: LayoutTable = serde_json::from_str(json).unwrap();
    assert!(matches!(layout.check_fits(64, 8), Err(Error::InvalidLayout(_))));
}
