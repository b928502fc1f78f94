use serde::Serialize;

pub const GRADE_MIN: f64 = 1.0;
pub const GRADE_MAX: f64 = 10.0;

/// A single student-day grade as typed into the journal.
///
/// Storage keeps the raw text; this is the interpretation used by the
/// row calculations. Only `Numeric` participates in percentages.
#[derive(Debug, Clone, PartialEq)]
pub enum Grade {
    Unset,
    Numeric(f64),
    Invalid(String),
}

impl Grade {
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Grade::Unset;
        }
        match numeric_value(text) {
            Some(v) if (GRADE_MIN..=GRADE_MAX).contains(&v) => Grade::Numeric(v),
            _ => Grade::Invalid(text.to_string()),
        }
    }

    pub fn numeric(&self) -> Option<f64> {
        match self {
            Grade::Numeric(v) => Some(*v),
            _ => None,
        }
    }
}

/// Number interpretation of free text. Blank counts as 0 so it never reaches a tier.
///
/// Only plain decimal notation is accepted. Hex literals ("0x8") and
/// infinities are rejected, since the numeric input can't produce them.
pub fn numeric_value(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeTier {
    High,
    Mid,
    Low,
}

impl GradeTier {
    /// Tier from the raw number, not the clamped grade: "11" still colours as high.
    pub fn for_text(text: &str) -> Option<Self> {
        let v = numeric_value(text)?;
        if v >= 8.0 {
            Some(GradeTier::High)
        } else if v >= 5.0 {
            Some(GradeTier::Mid)
        } else if v >= 1.0 {
            Some(GradeTier::Low)
        } else {
            None
        }
    }
}
