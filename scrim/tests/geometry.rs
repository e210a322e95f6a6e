use scrim::{
    DisplayConfig, ModalKind, ModalPosition, ModalSize, Rect, Z_BASE, Z_LEVEL_STEP, kind_bonus,
    modal_area, z_index,
};

// ============================================================================
// Rect
// ============================================================================

#[test]
fn test_rect_contains_is_half_open() {
    let rect = Rect::new(10, 10, 30, 3);
    assert!(rect.contains(10, 10));
    assert!(rect.contains(39, 12));
    assert!(!rect.contains(40, 10));
    assert!(!rect.contains(10, 13));
    assert!(!rect.contains(9, 10));
}

// ============================================================================
// Z-index
// ============================================================================

#[test]
fn test_z_index_reference_points() {
    assert_eq!(z_index(0, &ModalKind::Confirmation), 15_500);
    assert_eq!(z_index(1, &ModalKind::Default), 15_100);
    assert_eq!(z_index(0, &ModalKind::Default), Z_BASE);
    assert_eq!(z_index(3, &ModalKind::Critical), Z_BASE + 3 * Z_LEVEL_STEP + 1_000);
}

#[test]
fn test_z_index_unknown_kind_gets_no_bonus() {
    let kind = ModalKind::Custom("campaign-editor".into());
    assert_eq!(kind_bonus(&kind), 0);
    assert_eq!(z_index(2, &kind), Z_BASE + 2 * Z_LEVEL_STEP);
}

// ============================================================================
// Modal area
// ============================================================================

#[test]
fn test_modal_area_md_preset_is_centered() {
    let screen = Rect::from_size(100, 40);
    let area = modal_area(screen, &DisplayConfig::default());
    assert_eq!(area, Rect::new(25, 10, 50, 20));
}

#[test]
fn test_modal_area_fullscreen_wins_over_size() {
    let screen = Rect::from_size(100, 40);
    let display = DisplayConfig {
        size: ModalSize::Sm,
        fullscreen: true,
        ..DisplayConfig::default()
    };
    assert_eq!(modal_area(screen, &display), screen);
}

#[test]
fn test_modal_area_fixed_is_clamped_to_screen() {
    let screen = Rect::from_size(100, 40);
    let display = DisplayConfig {
        size: ModalSize::Fixed {
            width: 200,
            height: 50,
        },
        ..DisplayConfig::default()
    };
    assert_eq!(modal_area(screen, &display), Rect::new(0, 0, 100, 40));
}

#[test]
fn test_modal_area_at_position_is_clamped() {
    let screen = Rect::from_size(100, 40);
    let display = DisplayConfig {
        size: ModalSize::Fixed {
            width: 20,
            height: 10,
        },
        position: ModalPosition::At { x: 95, y: 38 },
        ..DisplayConfig::default()
    };
    assert_eq!(modal_area(screen, &display), Rect::new(80, 30, 20, 10));
}

#[test]
fn test_modal_area_keeps_minimum_size_on_tiny_screens() {
    let screen = Rect::from_size(8, 2);
    let display = DisplayConfig {
        size: ModalSize::Sm,
        ..DisplayConfig::default()
    };
    let area = modal_area(screen, &display);
    assert_eq!(area.width, 10);
    assert_eq!(area.height, 3);
    assert_eq!((area.x, area.y), (0, 0));
}

#[test]
fn test_modal_area_proportional() {
    let screen = Rect::from_size(100, 40);
    let display = DisplayConfig {
        size: ModalSize::Proportional {
            width: 0.6,
            height: 0.25,
        },
        ..DisplayConfig::default()
    };
    assert_eq!(modal_area(screen, &display), Rect::new(20, 15, 60, 10));
}
