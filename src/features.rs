//! Signal aggregator: concatenate the twelve standard leads.
//!
//! Leads are laid out in ascending index order regardless of the order they
//! arrive in. The rhythm strip and any other non-standard lead is ignored.
//! Each lead keeps its own `[0, 1]` scaling; nothing is renormalised across
//! leads.

use crate::error::EcgError;
use crate::types::{FeatureVector, LeadId, LeadSignal, STANDARD_LEADS};

/// Build the feature vector from per-lead signals.
///
/// Fails with [`EcgError::LeadCountMismatch`] unless every standard lead
/// 1..=12 is present exactly once.
pub fn aggregate(signals: &[LeadSignal]) -> Result<FeatureVector, EcgError> {
    let mut slots: [Option<&LeadSignal>; STANDARD_LEADS] = [None; STANDARD_LEADS];
    for signal in signals.iter().filter(|s| s.lead.is_standard()) {
        let slot = &mut slots[signal.lead.0 as usize - 1];
        if slot.is_some() {
            return Err(EcgError::LeadCountMismatch {
                expected: STANDARD_LEADS,
                found: signals.iter().filter(|s| s.lead.is_standard()).count(),
            });
        }
        *slot = Some(signal);
    }

    let found = slots.iter().filter(|s| s.is_some()).count();
    if found != STANDARD_LEADS {
        return Err(EcgError::LeadCountMismatch {
            expected: STANDARD_LEADS,
            found,
        });
    }

    let total: usize = slots.iter().flatten().map(|s| s.len()).sum();
    let mut values = Vec::with_capacity(total);
    for signal in slots.iter().flatten() {
        values.extend(signal.values.iter().map(|&v| v as f64));
    }
    Ok(FeatureVector::from_raw(values))
}

/// Offset of `lead`'s block inside a feature vector of `samples` per lead.
pub fn lead_offset(lead: LeadId, samples: usize) -> Option<usize> {
    lead.is_standard().then(|| (lead.0 as usize - 1) * samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RHYTHM_LEAD, SAMPLES_PER_LEAD};

    fn signal(lead: u8) -> LeadSignal {
        LeadSignal {
            lead: LeadId(lead),
            values: vec![lead as f32 / 100.0; SAMPLES_PER_LEAD],
        }
    }

    #[test]
    fn leads_are_concatenated_in_index_order() {
        let mut signals: Vec<LeadSignal> = (1..=13).rev().map(signal).collect();
        signals.swap(0, 5);
        let fv = aggregate(&signals).unwrap();
        assert_eq!(fv.len(), 12 * SAMPLES_PER_LEAD);
        for lead in 1..=12u8 {
            let off = lead_offset(LeadId(lead), SAMPLES_PER_LEAD).unwrap();
            assert!((fv.as_slice()[off] - lead as f64 / 100.0).abs() < 1e-6);
        }
        assert!(lead_offset(LeadId(RHYTHM_LEAD), SAMPLES_PER_LEAD).is_none());
    }

    #[test]
    fn missing_lead_is_a_count_mismatch() {
        let signals: Vec<LeadSignal> = (1..=11).map(signal).chain([signal(RHYTHM_LEAD)]).collect();
        assert!(matches!(
            aggregate(&signals),
            Err(EcgError::LeadCountMismatch {
                expected: 12,
                found: 11
            })
        ));
    }

    #[test]
    fn duplicate_lead_is_rejected() {
        let mut signals: Vec<LeadSignal> = (1..=12).map(signal).collect();
        signals.push(signal(4));
        assert!(matches!(
            aggregate(&signals),
            Err(EcgError::LeadCountMismatch { found: 13, .. })
        ));
    }
}
