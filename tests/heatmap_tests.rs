mod common;

use common::date;
use potalog::core::heatmap::{DayActivity, activity_level, build_calendar, new_park_level};
use potalog::db::DateCount;

#[test]
fn test_activity_level_thresholds() {
    assert_eq!(activity_level(0), 0);
    assert_eq!(activity_level(1), 1);
    assert_eq!(activity_level(3), 1);
    assert_eq!(activity_level(4), 2);
    assert_eq!(activity_level(9), 2);
    assert_eq!(activity_level(10), 3);
    assert_eq!(activity_level(19), 3);
    assert_eq!(activity_level(20), 4);
    assert_eq!(activity_level(200), 4);
}

#[test]
fn test_new_park_level_thresholds() {
    assert_eq!(new_park_level(0), 0);
    assert_eq!(new_park_level(1), 1);
    assert_eq!(new_park_level(2), 2);
    assert_eq!(new_park_level(3), 3);
    assert_eq!(new_park_level(4), 4);
    assert_eq!(new_park_level(40), 4);
}

#[test]
fn test_build_calendar_empty_input() {
    assert!(build_calendar(&[], date("2024-01-10"), activity_level).is_empty());
}

#[test]
fn test_build_calendar_fills_gap_days_with_zero() {
    let rows = vec![
        DateCount {
            date: date("2024-01-01"),
            count: 2,
        },
        DateCount {
            date: date("2024-01-03"),
            count: 12,
        },
    ];

    let cal = build_calendar(&rows, date("2024-01-04"), activity_level);
    assert_eq!(
        cal,
        vec![
            DayActivity {
                date: date("2024-01-01"),
                count: 2,
                level: 1
            },
            DayActivity {
                date: date("2024-01-02"),
                count: 0,
                level: 0
            },
            DayActivity {
                date: date("2024-01-03"),
                count: 12,
                level: 3
            },
            DayActivity {
                date: date("2024-01-04"),
                count: 0,
                level: 0
            },
        ]
    );
}

#[test]
fn test_build_calendar_single_day_history() {
    let rows = vec![DateCount {
        date: date("2024-01-01"),
        count: 1,
    }];
    let cal = build_calendar(&rows, date("2024-01-01"), new_park_level);
    assert_eq!(cal.len(), 1);
    assert_eq!(cal[0].level, 1);
}
