//! Contour level selection.
//!
//! A [`LevelRange`] is a half-open arithmetic progression like
//! `(0, 1000, 100)`; [`Levels`] is the validated, non-empty sequence the
//! pipeline consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContourError;

/// Refuse ranges that would expand beyond this many levels.
const MAX_LEVELS: usize = 1_000_000;

/// `start`, `stop`, `step` with `stop` excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl LevelRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Expand into concrete elevations, `start + i * step` for each `i`
    /// that stays strictly before `stop` in the direction of `step`.
    pub fn values(&self) -> Result<Vec<f64>, ContourError> {
        let Self { start, stop, step } = *self;
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(ContourError::InvalidLevelSpec(format!(
                "range {self} must be finite"
            )));
        }
        if step == 0.0 {
            return Err(ContourError::InvalidLevelSpec(format!(
                "range {self} has a zero step"
            )));
        }

        let span = (stop - start) / step;
        let count = if span > 0.0 { span.ceil() } else { 0.0 };
        if count > MAX_LEVELS as f64 {
            return Err(ContourError::InvalidLevelSpec(format!(
                "range {self} expands to more than {MAX_LEVELS} levels"
            )));
        }

        Ok((0..count as usize)
            .map(|i| start + i as f64 * step)
            .collect())
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.start, self.stop, self.step)
    }
}

impl FromStr for LevelRange {
    type Err = ContourError;

    /// Accepts `(0, 1000, 100)`, `0,1000,100` or `0:1000:100`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let sep = if inner.contains(',') { ',' } else { ':' };
        let parts: Vec<&str> = inner.split(sep).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ContourError::InvalidLevelSpec(format!(
                "expected start,stop,step but got '{s}'"
            )));
        }

        let parse = |part: &str| -> Result<f64, ContourError> {
            part.parse::<f64>().map_err(|_| {
                ContourError::InvalidLevelSpec(format!("'{part}' is not a number in '{s}'"))
            })
        };

        Ok(Self::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

/// Non-empty ordered sequence of finite elevations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Levels(Vec<f64>);

impl Levels {
    /// Validate an explicit list of elevations. Order is kept as given.
    pub fn new(values: Vec<f64>) -> Result<Self, ContourError> {
        if values.is_empty() {
            return Err(ContourError::InvalidLevelSpec(
                "no contour levels requested".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ContourError::InvalidLevelSpec(format!(
                "level {bad} is not finite"
            )));
        }
        Ok(Self(values))
    }

    pub fn from_range(range: &LevelRange) -> Result<Self, ContourError> {
        Self::new(range.values()?).map_err(|_| {
            ContourError::InvalidLevelSpec(format!("range {range} contains no levels"))
        })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<LevelRange> for Levels {
    type Error = ContourError;

    fn try_from(range: LevelRange) -> Result<Self, Self::Error> {
        Self::from_range(&range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_python_style_tuple() {
        let range: LevelRange = "(0, 1000, 100)".parse().unwrap();
        assert_eq!(range, LevelRange::new(0.0, 1000.0, 100.0));
        let levels = Levels::from_range(&range).unwrap();
        assert_eq!(levels.len(), 10);
        assert_eq!(levels.as_slice()[0], 0.0);
        assert_eq!(levels.as_slice()[9], 900.0, "Stop is excluded");
    }

    #[test]
    fn test_parse_other_separators() {
        assert_eq!(
            "5:20:5".parse::<LevelRange>().unwrap().values().unwrap(),
            vec![5.0, 10.0, 15.0]
        );
        assert_eq!(
            "2.5,4,0.5".parse::<LevelRange>().unwrap().values().unwrap(),
            vec![2.5, 3.0, 3.5]
        );
    }

    #[test]
    fn test_descending_range() {
        let values = LevelRange::new(30.0, 0.0, -10.0).values().unwrap();
        assert_eq!(values, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_partial_last_step() {
        let values = LevelRange::new(0.0, 25.0, 10.0).values().unwrap();
        assert_eq!(values, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = LevelRange::new(0.0, 10.0, 0.0).values().unwrap_err();
        assert!(matches!(err, ContourError::InvalidLevelSpec(_)));
    }

    #[test]
    fn test_empty_range_rejected() {
        let err = Levels::from_range(&LevelRange::new(10.0, 0.0, 5.0)).unwrap_err();
        assert!(matches!(err, ContourError::InvalidLevelSpec(_)));
        assert!(Levels::new(Vec::new()).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LevelRange::new(0.0, f64::INFINITY, 1.0).values().is_err());
        assert!(Levels::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_huge_range_rejected() {
        assert!(LevelRange::new(0.0, 1e12, 1.0).values().is_err());
    }

    #[test]
    fn test_malformed_strings() {
        assert!("(0, 10)".parse::<LevelRange>().is_err());
        assert!("(a, 10, 1)".parse::<LevelRange>().is_err());
        assert!("".parse::<LevelRange>().is_err());
    }

    #[test]
    fn test_explicit_levels_keep_order() {
        let levels = Levels::new(vec![50.0, 10.0, 30.0]).unwrap();
        assert_eq!(levels.as_slice(), &[50.0, 10.0, 30.0]);
    }
}
