use core::hash::BuildHasher;
use hashbrown::HashMap;
use twokey::{HashComparer, TwoKeyMap};

/// A map keyed by a `u32` id and a `String` name, as the benchmarks use it.
pub type RecordMap<S> =
    TwoKeyMap<u32, String, u64, HashComparer<S>, HashComparer<S>>;

/// The name stored for id `i`.
pub fn name_for(i: u32) -> String {
    format!("record-{i}")
}

/// Builds a [`RecordMap`] with ids `0..size`.
pub fn record_map<S: BuildHasher + Clone>(size: u32, hasher: S) -> RecordMap<S> {
    let mut map = TwoKeyMap::with_comparers(
        HashComparer::with_hasher(hasher.clone()),
        HashComparer::with_hasher(hasher),
    );
    for i in 0..size {
        map.add(i, name_for(i), u64::from(i) * 3)
            .expect("ids and names are unique");
    }
    map
}

/// The usual hand-rolled alternative to a two-key map: one map per key,
/// with the value stored next to the other key.
///
/// Keeping the two maps in sync is the caller's job, which is the part a
/// [`TwoKeyMap`] takes over.
pub struct PairedMaps<S> {
    by_id: HashMap<u32, (String, u64), S>,
    by_name: HashMap<String, u32, S>,
}

impl<S: BuildHasher + Clone> PairedMaps<S> {
    pub fn new(size: u32, hasher: S) -> Self {
        let mut maps = Self {
            by_id: HashMap::with_hasher(hasher.clone()),
            by_name: HashMap::with_hasher(hasher),
        };
        for i in 0..size {
            maps.add(i, name_for(i), u64::from(i) * 3);
        }
        maps
    }

    /// Adds an entry unless either key is present.
    pub fn add(&mut self, id: u32, name: String, value: u64) -> bool {
        if self.by_id.contains_key(&id) || self.by_name.contains_key(&name) {
            return false;
        }
        self.by_name.insert(name.clone(), id);
        self.by_id.insert(id, (name, value));
        true
    }

    pub fn get_by_id(&self, id: u32) -> Option<&u64> {
        self.by_id.get(&id).map(|(_, value)| value)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&u64> {
        let id = self.by_name.get(name)?;
        self.get_by_id(*id)
    }

    pub fn remove_by_name(&mut self, name: &str) -> bool {
        match self.by_name.remove(name) {
            Some(id) => self.by_id.remove(&id).is_some(),
            None => false,
        }
    }
}
