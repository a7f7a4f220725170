use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::FeedEntityKind;

/// maps GTFS identifiers to the Onestop IDs they resolved to during graph
/// construction. trips map to their route stop pattern. handed by value to
/// each schedule chunk.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GtfsIdMap {
    entries: BTreeMap<FeedEntityKind, BTreeMap<String, String>>,
}

impl GtfsIdMap {
    /// records a mapping, returning the previous Onestop ID if there was one.
    pub fn insert(&mut self, kind: FeedEntityKind, gtfs_id: &str, onestop_id: &str) -> Option<String> {
        self.entries
            .entry(kind)
            .or_default()
            .insert(gtfs_id.to_string(), onestop_id.to_string())
    }

    pub fn get(&self, kind: FeedEntityKind, gtfs_id: &str) -> Option<&str> {
        self.entries
            .get(&kind)
            .and_then(|ids| ids.get(gtfs_id))
            .map(String::as_str)
    }

    pub fn len(&self, kind: FeedEntityKind) -> usize {
        self.entries.get(&kind).map(BTreeMap::len).unwrap_or_default()
    }

    /// drops mappings of `kind` to Onestop IDs outside of `keep`.
    pub fn retain(&mut self, kind: FeedEntityKind, keep: &BTreeSet<String>) {
        if let Some(ids) = self.entries.get_mut(&kind) {
            ids.retain(|_, onestop_id| keep.contains(onestop_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GtfsIdMap;
    use crate::graph::FeedEntityKind;
    use std::collections::BTreeSet;

    #[test]
    fn test_insert_and_retain() {
        let mut map = GtfsIdMap::default();
        assert_eq!(map.insert(FeedEntityKind::Stop, "70011", "s-9q8yy-sf"), None);
        map.insert(FeedEntityKind::Stop, "70021", "s-9q8yt-22nd");
        map.insert(FeedEntityKind::Route, "70011", "r-9q9-local");
        assert_eq!(map.get(FeedEntityKind::Stop, "70011"), Some("s-9q8yy-sf"));
        assert_eq!(map.get(FeedEntityKind::Trip, "70011"), None);

        let keep = BTreeSet::from([String::from("s-9q8yy-sf")]);
        map.retain(FeedEntityKind::Stop, &keep);
        assert_eq!(map.len(FeedEntityKind::Stop), 1);
        assert_eq!(map.len(FeedEntityKind::Route), 1);
    }

    #[test]
    fn test_serializes_by_kind() {
        let mut map = GtfsIdMap::default();
        map.insert(FeedEntityKind::Agency, "CT", "o-9q9-caltrain");
        let json = serde_json::to_value(&map).expect("should serialize");
        assert_eq!(json["entries"]["agency"]["CT"], "o-9q9-caltrain");
    }
}
