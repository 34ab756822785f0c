use std::cell::Cell;

/// Marks one scheduled save. Only the newest ticket may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutosaveTicket(u64);

/// Coalesces bursts of edits into a single delayed save.
#[derive(Debug, Default)]
pub struct AutosaveDebounce {
    latest: Cell<u64>,
}

impl AutosaveDebounce {
    /// Supersedes any pending save and hands out the ticket for the next one.
    pub fn schedule(&self) -> AutosaveTicket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        AutosaveTicket(next)
    }

    /// True while no newer edit has been scheduled since `ticket`.
    pub fn is_current(&self, ticket: AutosaveTicket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// Sleeps for the autosave interval. Native builds have no browser timer and
/// save right away.
pub async fn wait(interval_ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(interval_ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    let _ = interval_ms;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_edit_in_a_burst_saves() {
        let debounce = AutosaveDebounce::default();
        let first = debounce.schedule();
        let second = debounce.schedule();
        let third = debounce.schedule();

        assert!(!debounce.is_current(first));
        assert!(!debounce.is_current(second));
        assert!(debounce.is_current(third));
    }

    #[test]
    fn a_quiet_period_keeps_the_ticket_valid() {
        let debounce = AutosaveDebounce::default();
        let ticket = debounce.schedule();
        futures::executor::block_on(wait(2_000));
        assert!(debounce.is_current(ticket));
    }
}
