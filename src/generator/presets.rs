//! Built-in generator formulas.

use std::f64::consts::{PI, TAU};

use super::WaveFormula;

/// The built-in single-cycle formulas, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Sine,
    HalfSine,
    AbsoluteSine,
    PulseSine,
    EvenSine,
    EvenAbsoluteSine,
    Square,
    DerivedSquare,
    Ramp,
    Saw,
    Pulse,
    Triangle,
    Spike,
    Charge,
}

impl Preset {
    pub const ALL: [Preset; 14] = [
        Preset::Sine,
        Preset::HalfSine,
        Preset::AbsoluteSine,
        Preset::PulseSine,
        Preset::EvenSine,
        Preset::EvenAbsoluteSine,
        Preset::Square,
        Preset::DerivedSquare,
        Preset::Ramp,
        Preset::Saw,
        Preset::Pulse,
        Preset::Triangle,
        Preset::Spike,
        Preset::Charge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Sine => "Sine",
            Preset::HalfSine => "Half-Sine",
            Preset::AbsoluteSine => "Absolute Sine",
            Preset::PulseSine => "Pulse-Sine",
            Preset::EvenSine => "Sine - even periods only",
            Preset::EvenAbsoluteSine => "Abs-Sine - even periods only",
            Preset::Square => "Square",
            Preset::DerivedSquare => "Derived Square",
            Preset::Ramp => "Ramp",
            Preset::Saw => "Saw",
            Preset::Pulse => "Pulse",
            Preset::Triangle => "Triangle",
            Preset::Spike => "Spike",
            Preset::Charge => "Charge",
        }
    }

    /// The preset following this one, wrapping at the end of the list.
    pub fn next(&self) -> Preset {
        let i = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl WaveFormula for Preset {
    fn eval(&self, p: f64) -> f64 {
        match self {
            Preset::Sine => (TAU * p).sin(),
            Preset::HalfSine => {
                if p > 0.5 {
                    0.0
                } else {
                    (TAU * p).sin()
                }
            }
            Preset::AbsoluteSine => (TAU * p).sin().abs(),
            Preset::PulseSine => {
                if (p * 4.0).floor() as i64 & 1 == 1 {
                    0.0
                } else {
                    (TAU * p).sin().abs()
                }
            }
            Preset::EvenSine => {
                if p > 0.5 {
                    0.0
                } else {
                    (2.0 * TAU * p).sin()
                }
            }
            Preset::EvenAbsoluteSine => {
                if p > 0.5 {
                    0.0
                } else {
                    (2.0 * TAU * p).sin().abs()
                }
            }
            Preset::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Preset::DerivedSquare => {
                let q = (0.5 - p).abs();
                let s = 2.0f64.powf(-q * 32.0);
                if p < 0.5 {
                    -s
                } else {
                    s
                }
            }
            Preset::Ramp => p * 2.0 - 1.0,
            Preset::Saw => 1.0 - p * 2.0,
            Preset::Pulse => {
                let duty = 0.25;
                if p < duty {
                    1.0
                } else {
                    -1.0
                }
            }
            Preset::Triangle => {
                let s = 4.0 * p;
                if p > 0.75 {
                    s - 4.0
                } else if p > 0.25 {
                    2.0 - s
                } else {
                    s
                }
            }
            Preset::Spike => {
                let n = (p * 4.0).floor();
                let q = p - 0.25 * n;
                let s = ((3.0 - n) * PI / 2.0 + q * TAU).sin();
                if p < 0.5 {
                    s + 1.0
                } else {
                    s - 1.0
                }
            }
            Preset::Charge => {
                let duty = 0.75;
                let s = if p < duty {
                    (p / duty * 0.5 * PI).sin()
                } else {
                    1.0 - ((p - duty) / (1.0 - duty) * 0.5 * PI).sin()
                };
                s * 2.0 - 1.0
            }
        }
    }
}
