use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use crate::core::types::DocId;

/// Routes a key to its shard. The cast goes through the unsigned
/// representation so negative keys land in a stable shard.
pub trait ShardKey: Copy + Ord + Send {
    fn shard_index(self, shard_count: usize) -> usize;
}

impl ShardKey for i32 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self as u32 as u64 % shard_count as u64) as usize
    }
}

impl ShardKey for i64 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self as u64 % shard_count as u64) as usize
    }
}

impl ShardKey for u32 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self as u64 % shard_count as u64) as usize
    }
}

impl ShardKey for u64 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self % shard_count as u64) as usize
    }
}

impl ShardKey for DocId {
    fn shard_index(self, shard_count: usize) -> usize {
        self.0.shard_index(shard_count)
    }
}

/// Integer-keyed map split into a fixed number of independently locked
/// shards.
///
/// Any single [`get`](Self::get) or [`remove`](Self::remove) is atomic
/// on its key; nothing spans shards. During parallel scoring this
/// replaces one map under one lock as the relevance accumulator, so
/// writers of different documents rarely contend.
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

/// Exclusive handle to one value. The owning shard stays locked for the
/// handle's lifetime.
pub struct ValueGuard<'a, V> {
    inner: MappedMutexGuard<'a, V>,
}

impl<V> Deref for ValueGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.inner
    }
}

impl<V> DerefMut for ValueGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.inner
    }
}

impl<K: ShardKey, V: Default> ConcurrentMap<K, V> {
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ConcurrentMap {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    /// Locks the owning shard and returns the value at `key`, creating a
    /// default-initialized entry if absent.
    pub fn get(&self, key: K) -> ValueGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        ValueGuard {
            inner: MutexGuard::map(shard.lock(), |map| map.entry(key).or_default()),
        }
    }

    /// Locks the owning shard and erases `key`.
    pub fn remove(&self, key: K) -> Option<V> {
        self.shards[key.shard_index(self.shards.len())].lock().remove(&key)
    }

    /// Merges every shard into one ordered map, locking the shards in
    /// sequence. Shard key sets are disjoint, so the merge never
    /// overwrites.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let map = shard.lock();
            result.extend(map.iter().map(|(key, value)| (*key, value.clone())));
        }
        result
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
