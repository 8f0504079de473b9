//! Operator alert message composition.
//!
//! The notifier gateway delivers plain text; these composers produce the
//! three message shapes the rack emits. Remaining-time phrasing comes from
//! [`crate::burn::humanize_duration`].

/// Message sent when a slot's burn-in timer elapses.
pub fn ready_for_pickup(serial: &str, row: i32, col: i32) -> String {
    format!("Drone {serial} is ready for pickup. (Row {row}, Column {col})")
}

/// Message sent when a device is cleared before its timer elapsed.
pub fn picked_up_early(serial: &str, remaining: &str) -> String {
    format!("Drone {serial} picked up early with {remaining} remaining.")
}

/// Message sent when a device is cleared at or after its end time.
pub fn picked_up(serial: &str) -> String {
    format!("Drone {serial} has been successfully picked up.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_includes_position() {
        assert_eq!(
            ready_for_pickup("M2300", 3, 2),
            "Drone M2300 is ready for pickup. (Row 3, Column 2)"
        );
    }

    #[test]
    fn early_pickup_includes_remaining() {
        assert_eq!(
            picked_up_early("DR-0017", "1 hour 30 minutes"),
            "Drone DR-0017 picked up early with 1 hour 30 minutes remaining."
        );
    }

    #[test]
    fn plain_pickup() {
        assert_eq!(
            picked_up("DR-0017"),
            "Drone DR-0017 has been successfully picked up."
        );
    }
}
