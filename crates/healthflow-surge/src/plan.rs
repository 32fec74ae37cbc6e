//! Surge reallocation planning.

use healthflow_core::error::HealthflowError;
use healthflow_core::models::resource::Resource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Proposed new available count for one resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReallocationPlan {
    pub resource_id: Uuid,
    pub name: String,
    pub resource_type: String,
    pub total_count: u32,
    /// Available count at the time the plan was computed.
    pub current: u32,
    /// Never exceeds `total_count`.
    pub proposed: u32,
}

impl ReallocationPlan {
    pub fn increase(&self) -> u32 {
        self.proposed.saturating_sub(self.current)
    }
}

/// Compute surge targets for every resource.
///
/// `proposed = min(total, available + floor(total * surge_percent / 100))`.
/// Pure and deterministic: the same input always yields the same plan.
pub fn propose_reallocation(resources: &[Resource], surge_percent: u32) -> Vec<ReallocationPlan> {
    resources
        .iter()
        .map(|r| {
            let released = u64::from(r.total_count) * u64::from(surge_percent) / 100;
            let target = u64::from(r.available_count) + released;
            let proposed = target.min(u64::from(r.total_count)) as u32;
            ReallocationPlan {
                resource_id: r.id,
                name: r.name.clone(),
                resource_type: r.resource_type.clone(),
                total_count: r.total_count,
                current: r.available_count,
                proposed,
            }
        })
        .collect()
}

/// Result of applying one plan entry.
#[derive(Debug)]
pub struct ReallocationOutcome {
    pub resource_id: Uuid,
    /// The updated resource, or why this entry was not applied.
    pub result: Result<Resource, HealthflowError>,
}

impl ReallocationOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&HealthflowError> {
        self.result.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn resource(name: &str, total: u32, available: u32) -> Resource {
        let now = Utc::now();
        Resource {
            id: Uuid::now_v7(),
            name: name.into(),
            resource_type: "beds".into(),
            total_count: total,
            available_count: available,
            location: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn icu_seed_is_capped_at_total() {
        let plan = propose_reallocation(&[resource("ICU Units", 20, 18)], 20);
        assert_eq!(plan[0].proposed, 20);
        assert_eq!(plan[0].increase(), 2);
    }

    #[test]
    fn beds_seed_gains_twenty_percent() {
        let plan = propose_reallocation(&[resource("Hospital Beds", 120, 85)], 20);
        assert_eq!(plan[0].current, 85);
        assert_eq!(plan[0].proposed, 109);
    }

    #[test]
    fn released_capacity_is_floored() {
        // floor(8 * 0.2) = 1, floor(25 * 0.2) = 5
        let plan = propose_reallocation(
            &[resource("Ambulances", 8, 3), resource("Doctors", 25, 15)],
            20,
        );
        assert_eq!(plan[0].proposed, 4);
        assert_eq!(plan[1].proposed, 20);
    }

    #[test]
    fn proposal_never_exceeds_total() {
        let resources: Vec<Resource> = (0..50u32)
            .flat_map(|total| (0..=total).map(move |avail| (total, avail)))
            .map(|(total, avail)| resource("r", total, avail))
            .collect();

        for percent in [0, 20, 50, 100] {
            for entry in propose_reallocation(&resources, percent) {
                assert!(entry.proposed <= entry.total_count);
                assert!(entry.proposed >= entry.current);
            }
        }
    }

    #[test]
    fn proposal_is_deterministic() {
        let resources = vec![
            resource("Hospital Beds", 120, 85),
            resource("ICU Units", 20, 18),
            resource("Doctors", 25, 15),
        ];
        let first = propose_reallocation(&resources, 20);
        let second = propose_reallocation(&resources, 20);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_capacity_stays_zero() {
        let plan = propose_reallocation(&[resource("Retired", 0, 0)], 20);
        assert_eq!(plan[0].proposed, 0);
    }
}
