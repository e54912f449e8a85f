//! Availability checks for a resource over a date window

use super::model::Reservation;
use super::window::DateWindow;

/// Whether two windows share at least one day. Both ends are inclusive.
pub fn conflicts(a: &DateWindow, b: &DateWindow) -> bool {
    a.overlaps(b)
}

/// First reservation of `resource_id` in `existing` that overlaps `candidate`.
///
/// `exclude` skips one reservation id, used when a reservation is moved and
/// must not collide with itself.
pub fn find_conflict<'a>(
    resource_id: i32,
    candidate: &DateWindow,
    existing: &'a [Reservation],
    exclude: Option<i32>,
) -> Option<&'a Reservation> {
    existing
        .iter()
        .filter(|r| r.resource_id == resource_id)
        .filter(|r| exclude != Some(r.id))
        .find(|r| conflicts(candidate, &r.window()))
}

pub fn is_available(
    resource_id: i32,
    candidate: &DateWindow,
    existing: &[Reservation],
    exclude: Option<i32>,
) -> bool {
    find_conflict(resource_id, candidate, existing, exclude).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow::parse(start, end).unwrap()
    }

    fn booked(id: i32, resource_id: i32, start: &str, end: &str) -> Reservation {
        let w = window(start, end);
        Reservation {
            id,
            resource_id,
            holder_id: 1,
            start_date: w.start(),
            end_date: w.end(),
            total: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_calendar_is_available() {
        assert!(is_available(1, &window("2025-01-01", "2025-01-04"), &[], None));
    }

    #[test]
    fn back_to_back_on_same_day_conflicts() {
        let existing = vec![booked(1, 7, "2025-01-01", "2025-01-04")];
        assert!(!is_available(7, &window("2025-01-04", "2025-01-08"), &existing, None));
        assert!(!is_available(7, &window("2024-12-30", "2025-01-01"), &existing, None));
        assert!(is_available(7, &window("2025-01-05", "2025-01-08"), &existing, None));
    }

    #[test]
    fn other_resources_are_ignored() {
        let existing = vec![booked(1, 7, "2025-01-01", "2025-01-04")];
        assert!(is_available(8, &window("2025-01-02", "2025-01-03"), &existing, None));
    }

    #[test]
    fn excluded_reservation_does_not_block_itself() {
        let existing = vec![
            booked(1, 7, "2025-01-01", "2025-01-04"),
            booked(2, 7, "2025-01-10", "2025-01-12"),
        ];
        let moved = window("2025-01-01", "2025-01-06");
        assert!(is_available(7, &moved, &existing, Some(1)));
        assert!(!is_available(7, &moved, &existing, None));

        let into_neighbour = window("2025-01-01", "2025-01-10");
        assert_eq!(find_conflict(7, &into_neighbour, &existing, Some(1)).map(|r| r.id), Some(2));
    }

    #[test]
    fn enclosing_window_conflicts() {
        let existing = vec![booked(1, 3, "2025-05-10", "2025-05-12")];
        assert!(!is_available(3, &window("2025-05-01", "2025-05-31"), &existing, None));
    }
}
