//! Quantity stepper on the product page.
//!
//! There is no upper bound: stock limits are enforced by the server.

pub const MIN_QUANTITY: u32 = 1;

/// Clamp free-form input to a valid quantity.
///
/// Anything below one, and anything that is not a number, becomes one.
pub fn clamp_input(raw: &str) -> u32 {
    let raw = raw.trim();
    let parsed = match raw.parse::<i64>() {
        Ok(value) => value as f64,
        Err(_) => raw.parse::<f64>().unwrap_or(f64::NAN),
    };
    if parsed.is_nan() || parsed < MIN_QUANTITY as f64 {
        return MIN_QUANTITY;
    }
    if parsed >= u32::MAX as f64 {
        return u32::MAX;
    }
    parsed.trunc() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self {
            value: MIN_QUANTITY,
        }
    }
}

impl QuantityStepper {
    pub fn from_input(raw: &str) -> Self {
        Self {
            value: clamp_input(raw),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_from_input(&mut self, raw: &str) -> u32 {
        self.value = clamp_input(raw);
        self.value
    }

    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// No-op at [`MIN_QUANTITY`].
    pub fn decrement(&mut self) -> u32 {
        if self.value > MIN_QUANTITY {
            self.value -= 1;
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrement_never_goes_below_one() {
        let mut stepper = QuantityStepper::from_input("2");
        assert_eq!(stepper.decrement(), 1);
        assert_eq!(stepper.decrement(), 1);
        assert_eq!(stepper.decrement(), 1);
    }

    #[test]
    fn increment_is_unbounded_but_saturates() {
        let mut stepper = QuantityStepper::from_input("41");
        assert_eq!(stepper.increment(), 42);
        let mut stepper = QuantityStepper::from_input(&u32::MAX.to_string());
        assert_eq!(stepper.increment(), u32::MAX);
    }

    #[test]
    fn manual_edits_clamp_to_one() {
        for raw in ["0", "-3", "", "abc", "0.4", "  "] {
            assert_eq!(clamp_input(raw), 1, "input {raw:?}");
        }
        assert_eq!(clamp_input(" 7 "), 7);
        assert_eq!(clamp_input("2.9"), 2);
    }

    #[test]
    fn set_from_input_replaces_value() {
        let mut stepper = QuantityStepper::default();
        assert_eq!(stepper.set_from_input("12"), 12);
        assert_eq!(stepper.decrement(), 11);
        assert_eq!(stepper.set_from_input("-1"), 1);
    }
}
