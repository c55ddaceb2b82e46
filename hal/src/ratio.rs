//! Minimal rational number for exact clock arithmetic.
//!
//! A reduced subset of `num-rational` built on the same `num-traits` and
//! `num-integer` foundations. Clock frequencies are carried as ratios so
//! that divider chains stay exact until the final integer conversion.

use core::ops::{Add, Div, Mul};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Ratio of two numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<T> {
    numer: T,
    denom: T,
}

impl<T: Clone + Integer> Ratio<T> {
    /// Create a new ratio, reducing to the normal form.
    ///
    /// # Panics
    ///
    /// Panics when `denom` is zero.
    pub fn new(numer: T, denom: T) -> Ratio<T> {
        let mut ret: Ratio<T> = Ratio::new_raw(numer, denom);
        ret.reduce();
        ret
    }

    /// Create a new ratio without reducing.
    pub const fn new_raw(numer: T, denom: T) -> Ratio<T> {
        Ratio { numer, denom }
    }

    /// Get the numerator.
    pub const fn numer(&self) -> &T {
        &self.numer
    }

    /// Get the denominator.
    pub const fn denom(&self) -> &T {
        &self.denom
    }

    /// Convert to an integer, rounding towards zero.
    pub fn to_integer(&self) -> T {
        self.numer.clone() / self.denom.clone()
    }

    fn reduce(&mut self) {
        assert!(!self.denom.is_zero(), "denominator is zero");
        if self.numer.is_zero() {
            self.denom.set_one();
            return;
        }
        let g: T = self.numer.gcd(&self.denom);
        self.numer = self.numer.clone() / g.clone();
        self.denom = self.denom.clone() / g;
    }
}

impl<T: Clone + Integer> Add for Ratio<T> {
    type Output = Ratio<T>;

    fn add(self, rhs: Ratio<T>) -> Ratio<T> {
        Ratio::new(
            self.numer * rhs.denom.clone() + rhs.numer * self.denom.clone(),
            self.denom * rhs.denom,
        )
    }
}

impl<T: Clone + Integer> Add<T> for Ratio<T> {
    type Output = Ratio<T>;

    fn add(self, rhs: T) -> Ratio<T> {
        Ratio::new(self.numer + rhs * self.denom.clone(), self.denom)
    }
}

impl<T: Clone + Integer> Mul for Ratio<T> {
    type Output = Ratio<T>;

    fn mul(self, rhs: Ratio<T>) -> Ratio<T> {
        Ratio::new(self.numer * rhs.numer, self.denom * rhs.denom)
    }
}

impl<T: Clone + Integer> Mul<T> for Ratio<T> {
    type Output = Ratio<T>;

    fn mul(self, rhs: T) -> Ratio<T> {
        Ratio::new(self.numer * rhs, self.denom)
    }
}

impl<T: Clone + Integer> Div for Ratio<T> {
    type Output = Ratio<T>;

    fn div(self, rhs: Ratio<T>) -> Ratio<T> {
        Ratio::new(self.numer * rhs.denom, self.denom * rhs.numer)
    }
}

impl<T: Clone + Integer> Div<T> for Ratio<T> {
    type Output = Ratio<T>;

    fn div(self, rhs: T) -> Ratio<T> {
        Ratio::new(self.numer, self.denom * rhs)
    }
}

impl From<Ratio<u16>> for f32 {
    fn from(ratio: Ratio<u16>) -> f32 {
        f32::from(ratio.numer) / f32::from(ratio.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::Ratio;

    #[test]
    fn reduction() {
        let r: Ratio<u32> = Ratio::new(48_000_000, 4);
        assert_eq!(*r.numer(), 12_000_000);
        assert_eq!(*r.denom(), 1);
        assert_eq!(Ratio::new(0u32, 7).denom(), &1);
    }

    #[test]
    fn clock_chain() {
        // 16 MHz HSI through a /4 prescaler and a x3 multiplier
        let hsi: Ratio<u32> = Ratio::new_raw(16_000_000, 1);
        let out: Ratio<u32> = hsi / 4 * 3;
        assert_eq!(out.to_integer(), 12_000_000);
    }

    #[test]
    fn truncation() {
        assert_eq!(Ratio::new_raw(32_768u32, 10_000).to_integer(), 3);
    }
}
