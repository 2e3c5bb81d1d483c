// Copyright 2025 the Shelf Virtual Scroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied item height rules.

use alloc::boxed::Box;
use core::fmt;

use crate::Scalar;

/// How the host describes item heights before they are measured.
///
/// Resolution order for an index is always: measured height, then this rule,
/// then the scroller's estimated item height. A rule result that is zero,
/// negative, or not finite is treated as "unknown" and falls back to the
/// estimate.
pub enum HeightRule<T, S: Scalar> {
    /// No rule; every unmeasured item uses the estimated item height.
    Estimated,
    /// Every item has the same height.
    Fixed(S),
    /// Height is derived from the item and its index.
    PerItem(Box<dyn Fn(&T, usize) -> S>),
}

impl<T, S: Scalar> HeightRule<T, S> {
    /// Creates a [`HeightRule::PerItem`] rule from a closure.
    pub fn per_item(f: impl Fn(&T, usize) -> S + 'static) -> Self {
        Self::PerItem(Box::new(f))
    }

    /// Evaluates the rule for `item` at `index`.
    ///
    /// Returns `None` when the rule has nothing usable to say, either because
    /// there is no rule, the item is missing, or the rule produced an
    /// unusable height.
    pub fn evaluate(&self, item: Option<&T>, index: usize) -> Option<S> {
        let height = match self {
            Self::Estimated => return None,
            Self::Fixed(height) => *height,
            Self::PerItem(f) => f(item?, index),
        };
        if height.is_usable_height() {
            Some(height)
        } else {
            log::warn!("height rule produced unusable height {height:?} for index {index}");
            None
        }
    }

    /// Returns the constant height if this is a usable [`HeightRule::Fixed`].
    #[must_use]
    pub fn fixed_height(&self) -> Option<S> {
        match self {
            Self::Fixed(height) if height.is_usable_height() => Some(*height),
            _ => None,
        }
    }
}

impl<T, S: Scalar> Default for HeightRule<T, S> {
    fn default() -> Self {
        Self::Estimated
    }
}

impl<T, S: Scalar> fmt::Debug for HeightRule<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Estimated => f.write_str("Estimated"),
            Self::Fixed(height) => f.debug_tuple("Fixed").field(height).finish(),
            Self::PerItem(_) => f.write_str("PerItem(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HeightRule;

    #[test]
    fn fixed_rule_ignores_item() {
        let rule = HeightRule::<&str, f64>::Fixed(200.0);
        assert_eq!(rule.evaluate(None, 3), Some(200.0));
        assert_eq!(rule.evaluate(Some(&"vol. 1"), 0), Some(200.0));
        assert_eq!(rule.fixed_height(), Some(200.0));
    }

    #[test]
    fn per_item_rule_needs_the_item() {
        let rule = HeightRule::<u32, f64>::per_item(|chapters, _| f64::from(*chapters) * 10.0);
        assert_eq!(rule.evaluate(Some(&4), 0), Some(40.0));
        assert_eq!(rule.evaluate(None, 0), None);
        assert_eq!(rule.fixed_height(), None);
    }

    #[test]
    fn unusable_rule_results_are_unknown() {
        let zero = HeightRule::<(), f64>::Fixed(0.0);
        assert_eq!(zero.evaluate(None, 0), None);
        assert_eq!(zero.fixed_height(), None);

        let nan = HeightRule::<(), f32>::per_item(|_, _| f32::NAN);
        assert_eq!(nan.evaluate(Some(&()), 0), None);

        let negative = HeightRule::<(), f64>::per_item(|_, i| -(i as f64));
        assert_eq!(negative.evaluate(Some(&()), 2), None);
    }
}
