use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-key async mutex map.  Holders of the same key are serialized, holders
/// of different keys run independently.  Guards are owned so they can be
/// held across await points.
pub struct KeyedLock<Key> {
    locks: Mutex<HashMap<Key, Arc<Mutex<()>>>>,
}

impl<Key> KeyedLock<Key>
where
    Key: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acquire(&self, key: Key) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

impl<Key> Default for KeyedLock<Key>
where
    Key: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
