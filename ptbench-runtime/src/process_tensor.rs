//! Spin-boson process tensor fixture names.
//!
//! A fixture name encodes every parameter needed to regenerate it, e.g.
//! `spinBoson_alpha0.25_zeta1.0_T39.3_cutoff1.0expon_tcut227.9_dt10_steps06_epsrel15`.
//! Time step, step count and precision are stored as base-2 exponents.

use crate::BenchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest base-2 exponent accepted in a name; `2^63` still fits the step count.
pub const MAX_EXPONENT: u32 = 63;

/// Spectral density cutoff shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoffType {
    Exponential,
    Gaussian,
}

impl CutoffType {
    /// Short tag used inside fixture names.
    pub fn tag(self) -> &'static str {
        match self {
            CutoffType::Exponential => "expon",
            CutoffType::Gaussian => "gauss",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "expon" => Some(CutoffType::Exponential),
            "gauss" => Some(CutoffType::Gaussian),
            _ => None,
        }
    }
}

/// Parameters of a spin-boson process tensor, as encoded in its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinBosonPt {
    pub alpha: f64,
    pub zeta: f64,
    pub temperature: f64,
    pub cutoff: f64,
    pub cutoff_type: CutoffType,
    pub tcut: f64,
    pub dt_exp: u32,
    pub steps_exp: u32,
    pub epsrel_exp: u32,
}

impl SpinBosonPt {
    pub fn dt(&self) -> f64 {
        2f64.powi(-(self.dt_exp as i32))
    }

    pub fn steps(&self) -> u64 {
        1u64 << self.steps_exp
    }

    pub fn epsrel(&self) -> f64 {
        2f64.powi(-(self.epsrel_exp as i32))
    }

    pub fn end_time(&self) -> f64 {
        2f64.powi(self.steps_exp as i32 - self.dt_exp as i32)
    }
}

impl fmt::Display for SpinBosonPt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spinBoson_alpha{:.2}_zeta{:.1}_T{:.1}_cutoff{:.1}{}_tcut{:.1}_dt{:02}_steps{:02}_epsrel{:02}",
            self.alpha,
            self.zeta,
            self.temperature,
            self.cutoff,
            self.cutoff_type.tag(),
            self.tcut,
            self.dt_exp,
            self.steps_exp,
            self.epsrel_exp
        )
    }
}

impl FromStr for SpinBosonPt {
    type Err = BenchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let invalid = || BenchError::InvalidProcessTensorName(name.to_string());

        let mut parts = name.split('_');
        if parts.next() != Some("spinBoson") {
            return Err(invalid());
        }

        let alpha = decimal_field(&mut parts, "alpha").ok_or_else(invalid)?;
        let zeta = decimal_field(&mut parts, "zeta").ok_or_else(invalid)?;
        let temperature = decimal_field(&mut parts, "T").ok_or_else(invalid)?;

        let cutoff_field = next_field(&mut parts, "cutoff").ok_or_else(invalid)?;
        let split = cutoff_field
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (cutoff_str, tag) = cutoff_field.split_at(split);
        let cutoff = parse_decimal(cutoff_str).ok_or_else(invalid)?;
        let cutoff_type = CutoffType::from_tag(tag).ok_or_else(invalid)?;

        let tcut = decimal_field(&mut parts, "tcut").ok_or_else(invalid)?;
        let dt_exp = exponent_field(&mut parts, "dt").ok_or_else(invalid)?;
        let steps_exp = exponent_field(&mut parts, "steps").ok_or_else(invalid)?;
        let epsrel_exp = exponent_field(&mut parts, "epsrel").ok_or_else(invalid)?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            alpha,
            zeta,
            temperature,
            cutoff,
            cutoff_type,
            tcut,
            dt_exp,
            steps_exp,
            epsrel_exp,
        })
    }
}

fn next_field<'a>(parts: &mut std::str::Split<'a, char>, prefix: &str) -> Option<&'a str> {
    parts
        .next()
        .and_then(|part| part.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
}

fn decimal_field(parts: &mut std::str::Split<'_, char>, prefix: &str) -> Option<f64> {
    next_field(parts, prefix).and_then(parse_decimal)
}

fn exponent_field(parts: &mut std::str::Split<'_, char>, prefix: &str) -> Option<u32> {
    next_field(parts, prefix).and_then(parse_exponent)
}

fn parse_decimal(s: &str) -> Option<f64> {
    if s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_exponent(s: &str) -> Option<u32> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok().filter(|exp| *exp <= MAX_EXPONENT)
    } else {
        None
    }
}
