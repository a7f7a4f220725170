use std::collections::BTreeSet;

use itertools::Itertools;

use super::{stop_lookup::StopLookup, QualityCheck, QualityReport};
use crate::{
    changeset::{AppliedChangeset, ChangesetError, EntityStore},
    geometry::geometry_ops,
    model::{
        entity::{EntityKind, Stop},
        issue::{Issue, IssueType},
    },
};

/// platforms closer than this to a sibling platform are reported.
pub const MINIMUM_DISTANCE_BETWEEN_PLATFORMS_METERS: f64 = 0.0;
/// platforms farther than this from their parent station are reported.
pub const PLATFORM_PARENT_DISTANCE_GAP_METERS: f64 = 500.0;

/// checks the distances between parent stations and their platforms.
///
/// a parent station is checked when it was touched directly or when one of
/// its platforms was. platforms touched by the changeset are compared with
/// each other and with their untouched siblings, so every pair is compared once.
pub struct StationHierarchyCheck;

impl QualityCheck for StationHierarchyCheck {
    fn name(&self) -> &'static str {
        "station hierarchy"
    }

    fn check(
        &self,
        store: &dyn EntityStore,
        changeset: &AppliedChangeset,
    ) -> Result<QualityReport, ChangesetError> {
        let mut lookup = StopLookup::new(store);
        let mut parents_to_check: BTreeSet<String> = BTreeSet::new();
        let mut parents_with_changed_platforms: BTreeSet<String> = BTreeSet::new();
        let mut changed_platforms: BTreeSet<String> = BTreeSet::new();

        for onestop_id in changeset.touched(EntityKind::Stop) {
            let Some(stop) = lookup.get(onestop_id)? else {
                continue;
            };
            match &stop.parent_station_onestop_id {
                Some(parent) => {
                    parents_to_check.insert(parent.clone());
                    parents_with_changed_platforms.insert(parent.clone());
                    changed_platforms.insert(stop.onestop_id.clone());
                }
                None => {
                    parents_to_check.insert(stop.onestop_id.clone());
                }
            }
        }

        let mut issues = vec![];
        for parent_onestop_id in parents_with_changed_platforms.iter() {
            let siblings = store.platforms_of(parent_onestop_id)?;
            let (changed, unchanged): (Vec<&Stop>, Vec<&Stop>) = siblings
                .iter()
                .sorted_by(|a, b| a.onestop_id.cmp(&b.onestop_id))
                .partition(|s| changed_platforms.contains(&s.onestop_id));

            for (a, b) in changed.iter().tuple_combinations() {
                issues.extend(platforms_too_close(a, b));
            }
            for (a, b) in changed.iter().cartesian_product(unchanged.iter()) {
                issues.extend(platforms_too_close(a, b));
            }
        }

        for parent_onestop_id in parents_to_check.iter() {
            let Some(parent) = lookup.get(parent_onestop_id)?.cloned() else {
                log::warn!("parent station {parent_onestop_id} not found, skipping hierarchy check");
                continue;
            };
            for platform in store.platforms_of(parent_onestop_id)? {
                let distance = geometry_ops::haversine_distance(&parent.geometry, &platform.geometry);
                if distance > PLATFORM_PARENT_DISTANCE_GAP_METERS {
                    let issue = Issue::new(
                        IssueType::StopPlatformParentDistanceGap,
                        format!(
                            "stop platform {} is {distance:.1}m from its parent stop {}",
                            platform.onestop_id, parent.onestop_id
                        ),
                    )
                    .with_entity(&parent.onestop_id, "geometry")
                    .with_entity(&platform.onestop_id, "geometry");
                    issues.push(issue);
                }
            }
        }

        Ok(QualityReport::from_issues(issues))
    }
}

fn platforms_too_close(a: &Stop, b: &Stop) -> Option<Issue> {
    let distance = geometry_ops::haversine_distance(&a.geometry, &b.geometry);
    if distance > MINIMUM_DISTANCE_BETWEEN_PLATFORMS_METERS {
        return None;
    }
    let issue = Issue::new(
        IssueType::StopPlatformsTooClose,
        format!(
            "stop platform {} is too close to stop platform {}",
            a.onestop_id, b.onestop_id
        ),
    )
    .with_entity(&a.onestop_id, "geometry")
    .with_entity(&b.onestop_id, "geometry");
    Some(issue)
}
