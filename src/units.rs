//! Typed lengths. PDF user space is measured in points (1/72 in); page geometry
//! for guest guides is specified in millimetres.

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul, Neg};

const PT_PER_IN: f32 = 72.0;
const MM_PER_IN: f32 = 25.4;

/// Points, the native PDF unit
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// Millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * PT_PER_IN / MM_PER_IN)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 * MM_PER_IN / PT_PER_IN)
    }
}

macro_rules! scalar_ops {
    ($t:ident) => {
        impl Mul<f32> for $t {
            type Output = $t;
            fn mul(self, rhs: f32) -> $t {
                $t(self.0 * rhs)
            }
        }

        impl Mul<$t> for f32 {
            type Output = $t;
            fn mul(self, rhs: $t) -> $t {
                $t(self * rhs.0)
            }
        }

        impl Div<f32> for $t {
            type Output = $t;
            fn div(self, rhs: f32) -> $t {
                $t(self.0 / rhs)
            }
        }

        /// Dividing two lengths yields a plain ratio
        impl Div<$t> for $t {
            type Output = f32;
            fn div(self, rhs: $t) -> f32 {
                self.0 / rhs.0
            }
        }

        impl Neg for $t {
            type Output = $t;
            fn neg(self) -> $t {
                $t(-self.0)
            }
        }
    };
}

scalar_ops!(Pt);
scalar_ops!(Mm);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_width_in_points() {
        let width: Pt = Mm(210.0).into();
        assert!((width.0 - 595.276).abs() < 0.01);
    }

    #[test]
    fn millimetres_survive_a_trip_through_points() {
        let mm: Mm = Pt::from(Mm(297.0)).into();
        assert!((mm.0 - 297.0).abs() < 1e-3);
    }

    #[test]
    fn ratio_of_lengths() {
        assert_eq!(Mm(10.0) / Mm(4.0), 2.5);
        assert_eq!(Pt(3.0) * 2.0, Pt(6.0));
        assert_eq!(-Mm(1.0), Mm(-1.0));
    }

    #[test]
    fn an_inch_is_72_points() {
        assert!((Pt::from(Mm(MM_PER_IN)).0 - PT_PER_IN).abs() < 1e-4);
    }
}
