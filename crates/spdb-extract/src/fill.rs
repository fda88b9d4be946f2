//! Fill-only-missing merge rules shared by every extraction cascade.
//!
//! A field counts as missing when it is an empty string, zero, or `false`.
//! Each helper returns `true` when it wrote the slot.

pub(crate) fn fill_text(slot: &mut String, value: Option<String>) -> bool {
    if !slot.is_empty() {
        return false;
    }
    match value {
        Some(v) if !v.trim().is_empty() => {
            *slot = v.trim().to_string();
            true
        }
        _ => false,
    }
}

pub(crate) fn fill_count(slot: &mut u64, value: Option<u64>) -> bool {
    match value {
        Some(v) if *slot == 0 && v > 0 => {
            *slot = v;
            true
        }
        _ => false,
    }
}

/// Flags only ever move from `false` to `true`.
pub(crate) fn fill_flag(slot: &mut bool, value: bool) -> bool {
    if *slot || !value {
        return false;
    }
    *slot = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_filled_only_when_empty() {
        let mut slot = String::new();
        assert!(fill_text(&mut slot, Some("  Jane Doe ".to_string())));
        assert_eq!(slot, "Jane Doe");
        assert!(!fill_text(&mut slot, Some("Other".to_string())));
        assert_eq!(slot, "Jane Doe");
    }

    #[test]
    fn blank_text_does_not_fill() {
        let mut slot = String::new();
        assert!(!fill_text(&mut slot, Some("   ".to_string())));
        assert!(!fill_text(&mut slot, None));
        assert!(slot.is_empty());
    }

    #[test]
    fn zero_counts_never_fill() {
        let mut slot = 0;
        assert!(!fill_count(&mut slot, Some(0)));
        assert!(fill_count(&mut slot, Some(870)));
        assert!(!fill_count(&mut slot, Some(900)));
        assert_eq!(slot, 870);
    }

    #[test]
    fn flags_are_monotonic() {
        let mut slot = false;
        assert!(!fill_flag(&mut slot, false));
        assert!(fill_flag(&mut slot, true));
        assert!(!fill_flag(&mut slot, false));
        assert!(slot);
    }
}
