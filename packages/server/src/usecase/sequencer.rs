//! Mutation-and-broadcast gate.

use tokio::sync::{Mutex, MutexGuard};

/// Serializes every "mutate registry, then notify clients" step.
///
/// While a guard is held no other step can run, so the order in which
/// snapshots are enqueued to connections is the order in which mutations were
/// applied, for every connection alike. Acquire it before the repository and
/// pusher locks.
#[derive(Debug, Default)]
pub struct BroadcastSequencer {
    gate: Mutex<()>,
}

impl BroadcastSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    #[tokio::test]
    async fn test_steps_do_not_interleave() {
        // テスト項目: ガードを保持している間、他のステップは開始されない
        // given (前提条件):
        let sequencer = Arc::new(BroadcastSequencer::new());
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));

        // when (操作):
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let sequencer = sequencer.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let _guard = sequencer.enter().await;
                    log.lock().unwrap().push(format!("begin-{}", n));
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    log.lock().unwrap().push(format!("end-{}", n));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): begin と end が必ず対になって並ぶ
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 16);
        for pair in log.chunks(2) {
            let begin = pair[0].strip_prefix("begin-").unwrap();
            let end = pair[1].strip_prefix("end-").unwrap();
            assert_eq!(begin, end);
        }
    }
}
