use std::collections::HashMap;
use std::sync::{Arc, Weak};

use stockscan_domain::LookupKey;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async lock per lookup key, so the lookup and the write of a scan run
/// as a unit against any other scan of the same key on this process.
///
/// Entries are held weakly and dropped once no scan for the key is queued.
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<LookupKey, Weak<Mutex<()>>>>,
}

impl KeyedLocks {
    pub async fn lock(&self, key: &LookupKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| lock.strong_count() > 0);
            match locks.get(key).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    let lock = Arc::new(Mutex::new(()));
                    locks.insert(key.clone(), Arc::downgrade(&lock));
                    lock
                }
            }
        };
        lock.lock_owned().await
    }

    pub async fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .await
            .values()
            .filter(|lock| lock.strong_count() > 0)
            .count()
    }
}
