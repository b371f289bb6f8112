//! Typed scalars shared by the detector, the scanner and the reporter.

use serde::Serialize;
use std::ops::Sub;

use crate::utils::{format_grouped_int, format_sig};

/// Smallest denominator used wherever an average or previous close can be zero.
pub const EPSILON: f64 = 1e-12;

macro_rules! define_price_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Default)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            pub const fn new(val: f64) -> Self {
                // Absolute prices should not be negative
                let v = if val < 0.0 { 0.0 } else { val };
                Self(v)
            }

            #[inline]
            pub fn value(self) -> f64 {
                self.0
            }

            /// Guards against division by a zero price.
            #[inline]
            pub fn as_safe_divisor(self) -> f64 {
                self.0.max(EPSILON)
            }
        }

        impl Sub for $name {
            type Output = f64;

            fn sub(self, rhs: Self) -> Self::Output {
                self.value() - rhs.value()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", format_sig(self.0, 6))
            }
        }
    };
}

define_price_type!(OpenPrice);
define_price_type!(HighPrice);
define_price_type!(LowPrice);
define_price_type!(ClosePrice);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Default)]
#[serde(transparent)]
pub struct BaseVol(f64);

impl BaseVol {
    pub const fn new(val: f64) -> Self {
        let v = if val < 0.0 { 0.0 } else { val };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for BaseVol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_grouped_int(self.0))
    }
}

/// How many times the baseline average the evaluated candle's volume must reach.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VolMultiplier(f64);

impl VolMultiplier {
    pub const DEFAULT_VALUE: f64 = 2.0;

    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for VolMultiplier {
    fn default() -> Self {
        Self(Self::DEFAULT_VALUE)
    }
}

impl std::fmt::Display for VolMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

/// Fractional close-to-close change (0.03 == +3%). Unclamped: negative moves are valid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceChangePct(f64);

impl PriceChangePct {
    pub const DEFAULT_VALUE: f64 = 0.03;

    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    /// Change from `prev` to `now`, relative to `prev` (floored at EPSILON).
    pub fn calculate(now: ClosePrice, prev: ClosePrice) -> Self {
        Self((now - prev) / prev.as_safe_divisor())
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for PriceChangePct {
    fn default() -> Self {
        Self(Self::DEFAULT_VALUE)
    }
}

impl std::fmt::Display for PriceChangePct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}%", self.0 * 100.)
    }
}
