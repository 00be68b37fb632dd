/// Lifecycle of the trigger, derived from attachment, queue emptiness and
/// in-flight work rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    /// Not yet attached to a sentinel.
    #[default]
    Idle,
    /// Attached, with work left in the queue or a batch still running.
    Observing,
    /// Attached, queue empty and nothing in flight.
    Exhausted,
}

/// The signal shown on the external status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObserverStatus {
    Observing,
    #[default]
    Off,
}

impl ObserverStatus {
    pub fn label(self) -> &'static str {
        match self {
            ObserverStatus::Observing => "Observing",
            ObserverStatus::Off => "Observer Off",
        }
    }

    pub fn is_on(self) -> bool {
        self == ObserverStatus::Observing
    }
}

/// One visibility notification for the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub is_visible: bool,
}

impl VisibilityEntry {
    pub fn visible() -> Self {
        Self { is_visible: true }
    }

    pub fn hidden() -> Self {
        Self { is_visible: false }
    }
}

/// What happens when a visibility event arrives while a batch is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Start another batch anyway; output of the two batches may interleave.
    Interleave,
    /// At most one batch in flight. Re-evaluates the last visibility when it ends.
    #[default]
    Guarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDecision {
    pub status: ObserverStatus,
    pub run_batch: bool,
}

impl TriggerDecision {
    fn off() -> Self {
        Self {
            status: ObserverStatus::Off,
            run_batch: false,
        }
    }
}

/// Bridges sentinel visibility to batch runs.
///
/// Every decision that sets `run_batch` counts as a batch in flight until the
/// caller reports it back through [`VisibilityTrigger::on_batch_finished`].
#[derive(Debug, Clone, Default)]
pub struct VisibilityTrigger {
    policy: OverlapPolicy,
    attached: bool,
    visible: bool,
    in_flight: usize,
    /// A visible callback arrived while a guarded batch was running.
    pending: bool,
}

impl VisibilityTrigger {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn batches_in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn state(&self, queue_empty: bool) -> TriggerState {
        if !self.attached {
            TriggerState::Idle
        } else if queue_empty && self.in_flight == 0 {
            TriggerState::Exhausted
        } else {
            TriggerState::Observing
        }
    }

    /// Attaches to the sentinel. Like any observer, attaching delivers an
    /// initial notification built from the last visibility seen.
    pub fn observe(&mut self, queue_empty: bool) -> TriggerDecision {
        self.attached = true;
        self.evaluate(queue_empty)
    }

    /// Handles one observer callback. Only the first entry is consulted.
    ///
    /// Returns `None` for an empty entry set, and while still idle (the
    /// visibility is remembered for the initial notification of `observe`).
    pub fn on_visibility(
        &mut self,
        entries: &[VisibilityEntry],
        queue_empty: bool,
    ) -> Option<TriggerDecision> {
        let entry = entries.first()?;
        self.visible = entry.is_visible;
        if !self.attached {
            return None;
        }
        Some(self.evaluate(queue_empty))
    }

    /// Reports the end of a batch started by an earlier decision.
    ///
    /// Under [`OverlapPolicy::Guarded`] a callback refused mid-batch is
    /// answered now, against the latest visibility. Without one, completion
    /// decides nothing: only callbacks start batches.
    pub fn on_batch_finished(&mut self, queue_empty: bool) -> Option<TriggerDecision> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !std::mem::take(&mut self.pending) || !self.attached {
            return None;
        }
        Some(self.evaluate(queue_empty))
    }

    fn evaluate(&mut self, queue_empty: bool) -> TriggerDecision {
        if !self.visible || queue_empty {
            self.pending = false;
            return TriggerDecision::off();
        }
        let run_batch = match self.policy {
            OverlapPolicy::Interleave => true,
            OverlapPolicy::Guarded => self.in_flight == 0,
        };
        if run_batch {
            self.in_flight += 1;
        } else {
            self.pending = true;
        }
        TriggerDecision {
            status: ObserverStatus::Observing,
            run_batch,
        }
    }
}
