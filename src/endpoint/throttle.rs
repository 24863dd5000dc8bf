use std::time::Duration;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Client-side rate gate for a trigger expression.
///
/// At most one call goes out per interval. A call arriving inside the
/// interval is held back; when the interval ends the latest held call is
/// sent, so the final value of a burst always reaches the server.
///
/// The server never enforces the interval; a client that ignores the gate
/// can still call as often as it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
}

impl Throttle {
    /// `None` for a zero interval, which means "not throttled".
    ///
    /// The client clock counts whole milliseconds, so a positive interval
    /// shorter than that is rounded up to 1 ms.
    pub fn new(interval: Duration) -> Option<Self> {
        (!interval.is_zero()).then(|| Self {
            interval: interval.max(MIN_INTERVAL),
        })
    }

    pub fn from_millis(millis: u64) -> Option<Self> {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wrap a function literal so it runs at most once per interval.
    ///
    /// A call outside the interval runs at once and its result is returned.
    /// Calls inside it only replace the pending arguments; one timer sends
    /// the latest of them when the interval ends.
    pub fn wrap(&self, function: &str) -> String {
        format!(
            "(function() {{ var last = 0, timer = null, pending = null, callback = {function}; \
             function fire() {{ var call = pending; pending = null; timer = null; last = Date.now(); \
             return callback.apply(call[0], call[1]); }} \
             return function() {{ pending = [this, arguments]; \
             var wait = {ms} - (Date.now() - last); \
             if (wait <= 0) {{ if (timer) {{ clearTimeout(timer); }} return fire(); }} \
             if (!timer) {{ timer = setTimeout(fire, wait); }} }}; }})()",
            ms = self.interval.as_millis()
        )
    }
}
