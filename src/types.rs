use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of standard leads that enter the feature vector.
pub const STANDARD_LEADS: usize = 12;
/// Lead index of the long rhythm strip.
pub const RHYTHM_LEAD: u8 = 13;
/// Samples per lead after resampling the selected contour.
pub const SAMPLES_PER_LEAD: usize = 255;

/// Lead identifier, 1-based (1..=12 standard leads, 13 rhythm strip).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub u8);

impl LeadId {
    pub fn is_standard(self) -> bool {
        (1..=STANDARD_LEADS as u8).contains(&self.0)
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-dimensional amplitude signal recovered from a lead, values in [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSignal {
    pub lead: LeadId,
    pub values: Vec<f32>,
}

impl LeadSignal {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Concatenated standard-lead signals in ascending lead order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wrap raw values. The aggregator is the regular producer; this exists
    /// for callers that feed the model stages directly.
    pub fn from_raw(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of the pretrained projection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReducedVector(pub Vec<f64>);

impl ReducedVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Terminal output of the pipeline.
///
/// The numeric codes are fixed by the label encoding of the trained
/// classifier artifact and must not be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Diagnosis {
    MyocardialInfarction,
    AbnormalHeartbeat,
    Normal,
    HistoryOfMyocardialInfarction,
}

impl Diagnosis {
    pub const ALL: [Diagnosis; 4] = [
        Diagnosis::MyocardialInfarction,
        Diagnosis::AbnormalHeartbeat,
        Diagnosis::Normal,
        Diagnosis::HistoryOfMyocardialInfarction,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Diagnosis::MyocardialInfarction),
            1 => Some(Diagnosis::AbnormalHeartbeat),
            2 => Some(Diagnosis::Normal),
            3 => Some(Diagnosis::HistoryOfMyocardialInfarction),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Diagnosis::MyocardialInfarction => 0,
            Diagnosis::AbnormalHeartbeat => 1,
            Diagnosis::Normal => 2,
            Diagnosis::HistoryOfMyocardialInfarction => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::MyocardialInfarction => "Myocardial Infarction",
            Diagnosis::AbnormalHeartbeat => "Abnormal Heartbeat",
            Diagnosis::Normal => "Normal",
            Diagnosis::HistoryOfMyocardialInfarction => "History of Myocardial Infarction",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_codes_follow_training_encoding() {
        assert_eq!(Diagnosis::from_code(0), Some(Diagnosis::MyocardialInfarction));
        assert_eq!(Diagnosis::from_code(1), Some(Diagnosis::AbnormalHeartbeat));
        assert_eq!(Diagnosis::from_code(2), Some(Diagnosis::Normal));
        assert_eq!(
            Diagnosis::from_code(3),
            Some(Diagnosis::HistoryOfMyocardialInfarction)
        );
        assert_eq!(Diagnosis::from_code(4), None);
        for d in Diagnosis::ALL {
            assert_eq!(Diagnosis::from_code(d.code()), Some(d));
        }
    }

    #[test]
    fn rhythm_lead_is_not_standard() {
        assert!(LeadId(1).is_standard());
        assert!(LeadId(12).is_standard());
        assert!(!LeadId(RHYTHM_LEAD).is_standard());
        assert!(!LeadId(0).is_standard());
    }
}
