use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::schedule::ScheduledTask;
use crate::store::Record;
use crate::typedid::{TypedId, TypedIdMarker};

/// Tracks the single most recently created or changed record of a kind. The
/// mark expires on its own after `duration`.
pub struct Highlighter<T: TypedIdMarker> {
    current: Arc<Mutex<Option<TypedId<T>>>>,
    expiry: Mutex<Option<ScheduledTask>>,
    duration: Duration,
}

impl<T: TypedIdMarker + Send + Sync + 'static> Highlighter<T> {
    pub fn new(duration: Duration) -> Highlighter<T> {
        Highlighter {
            current: Arc::new(Mutex::new(None)),
            expiry: Mutex::new(None),
            duration,
        }
    }

    /// Marks `id`, replacing any previous mark and its pending expiry.
    pub async fn mark(&self, id: TypedId<T>) {
        let mut expiry = self.expiry.lock().await;
        *self.current.lock().await = Some(id);

        let current = Arc::clone(&self.current);
        let task = ScheduledTask::once(self.duration, move || async move {
            let mut current = current.lock().await;
            if *current == Some(id) {
                debug!("highlight expired for {}", id);
                *current = None;
            }
        });

        // dropping the previous task aborts it
        *expiry = Some(task);
    }

    pub async fn current(&self) -> Option<TypedId<T>> {
        *self.current.lock().await
    }
}

/// A record annotated with whether it is the highlighted one.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlighted<R> {
    pub record: R,
    pub highlighted: bool,
}

pub fn annotate<R: Record>(records: Vec<R>, current: Option<TypedId<R>>) -> Vec<Highlighted<R>> {
    records
        .into_iter()
        .map(|record| Highlighted {
            highlighted: current == Some(record.id()),
            record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    struct Card;

    impl TypedIdMarker for Card {
        fn tag() -> &'static str {
            "C"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mark_expires_after_duration() {
        let highlighter = Highlighter::<Card>::new(Duration::from_secs(3));
        highlighter.mark(TypedId::new(1)).await;

        time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(highlighter.current().await, Some(TypedId::new(1)));

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(highlighter.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn remarking_restarts_the_expiry() {
        let highlighter = Highlighter::<Card>::new(Duration::from_secs(3));
        highlighter.mark(TypedId::new(1)).await;

        time::sleep(Duration::from_secs(2)).await;
        highlighter.mark(TypedId::new(2)).await;
        assert_eq!(highlighter.current().await, Some(TypedId::new(2)));

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(highlighter.current().await, Some(TypedId::new(2)));

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(highlighter.current().await, None);
    }
}
