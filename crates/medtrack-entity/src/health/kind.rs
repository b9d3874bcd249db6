//! Health-metric kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of measurement a health record holds.
///
/// Each kind carries its own field group: blood-pressure records use
/// systolic/diastolic/pulse; glucose records use glucose level + fasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "metric_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Blood-pressure measurement.
    BloodPressure,
    /// Blood-glucose measurement.
    Glucose,
}

impl MetricKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodPressure => "blood_pressure",
            Self::Glucose => "glucose",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = medtrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blood_pressure" => Ok(Self::BloodPressure),
            "glucose" => Ok(Self::Glucose),
            _ => Err(medtrack_core::AppError::validation(format!(
                "Invalid metric kind: '{s}'. Expected one of: blood_pressure, glucose"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "blood_pressure".parse::<MetricKind>().unwrap(),
            MetricKind::BloodPressure
        );
        assert_eq!("GLUCOSE".parse::<MetricKind>().unwrap(), MetricKind::Glucose);
        assert!("weight".parse::<MetricKind>().is_err());
    }
}
