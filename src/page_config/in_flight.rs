use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

type Pending<T> = Shared<LocalBoxFuture<'static, T>>;

/// At most one running load per key; callers arriving while it runs await
/// the same result.
pub struct InFlight<T: Clone> {
    pending: RefCell<HashMap<String, Pending<T>>>,
}

impl<T: Clone + 'static> InFlight<T> {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(HashMap::new()),
        }
    }

    /// Joins the load running for `key`, or starts one with `start`.
    pub async fn run<F, Fut>(&self, key: &str, start: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + 'static,
    {
        let joined = self.pending.borrow().get(key).cloned();
        let pending = match joined {
            Some(pending) => pending,
            None => {
                let pending = start().boxed_local().shared();
                self.pending
                    .borrow_mut()
                    .insert(key.to_string(), pending.clone());
                pending
            }
        };

        let result = pending.clone().await;

        let mut map = self.pending.borrow_mut();
        if map.get(key).is_some_and(|current| current.ptr_eq(&pending)) {
            map.remove(key);
        }
        result
    }

    /// Forgets running loads so the next caller starts a fresh one.
    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.pending.borrow().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::join;

    use super::*;

    #[test]
    fn concurrent_callers_share_one_load() {
        let in_flight = InFlight::<u32>::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let receiver = RefCell::new(Some(rx));
        let starts = Cell::new(0);
        let start = || {
            starts.set(starts.get() + 1);
            let rx = receiver.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx.await.unwrap_or(0),
                    None => 0,
                }
            }
        };

        let ((first, second), ()) = block_on(join(
            join(in_flight.run("offer", start), in_flight.run("offer", start)),
            async move {
                tx.send(7).ok();
            },
        ));

        assert_eq!((first, second), (7, 7));
        assert_eq!(starts.get(), 1);
        assert!(!in_flight.is_running("offer"));
    }

    #[test]
    fn finished_loads_are_not_reused() {
        let in_flight = InFlight::<u32>::new();
        let starts = Cell::new(0);
        let start = || {
            starts.set(starts.get() + 1);
            async { 1 }
        };

        block_on(in_flight.run("intro", start));
        block_on(in_flight.run("intro", start));
        assert_eq!(starts.get(), 2);
    }

    #[test]
    fn clear_lets_the_next_caller_start_over() {
        let in_flight = InFlight::<u32>::new();
        let (_tx, rx) = oneshot::channel::<u32>();
        let stalled = in_flight.run("result", move || async move { rx.await.unwrap_or(0) });
        let mut stalled = Box::pin(stalled);
        block_on(async {
            assert!(futures::poll!(stalled.as_mut()).is_pending());
        });
        assert!(in_flight.is_running("result"));

        in_flight.clear();
        assert!(!in_flight.is_running("result"));
        assert_eq!(block_on(in_flight.run("result", || async { 2 })), 2);
    }
}
