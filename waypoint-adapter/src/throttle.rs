/// Decides whether a scroll/resize notification may trigger an evaluation now.
///
/// Rejected notifications are not lost: the controller keeps the latest one pending and retries
/// it from `tick`.
///
/// Only host notifications (`on_scroll` / `on_resize`) go through the policy. The evaluations run
/// by `mount` and `update` always happen immediately.
pub trait ThrottlePolicy {
    fn admit(&mut self, now_ms: u64) -> bool;
}

/// Evaluates on every notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unthrottled;

impl ThrottlePolicy for Unthrottled {
    fn admit(&mut self, _now_ms: u64) -> bool {
        true
    }
}

/// Admits at most one evaluation per `interval_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub interval_ms: u64,
    last_ms: Option<u64>,
}

impl Interval {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl ThrottlePolicy for Interval {
    fn admit(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }
}
