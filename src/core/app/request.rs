use super::SubmitBlocker;

/// Whether a chat request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Sending,
}

impl RequestState {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Sending => "sending",
        }
    }
}

/// Send lifecycle: at most one request in flight, identified by a
/// monotonically increasing id so a settlement is applied exactly once.
#[derive(Debug, Default)]
pub struct RequestLifecycle {
    in_flight: Option<u64>,
    next_request_id: u64,
    last_error: Option<String>,
    rejected_submits: u64,
    last_rejection: Option<SubmitBlocker>,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        if self.in_flight.is_some() {
            RequestState::Sending
        } else {
            RequestState::Idle
        }
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Enter `Sending` and return the new request id. Clears `last_error`.
    pub fn begin(&mut self) -> u64 {
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        self.last_error = None;
        self.next_request_id
    }

    pub fn rejected_submits(&self) -> u64 {
        self.rejected_submits
    }

    pub fn last_rejection(&self) -> Option<SubmitBlocker> {
        self.last_rejection
    }

    /// Note a submit the guard refused. Nothing else changes.
    pub fn reject(&mut self, blocker: SubmitBlocker) {
        self.rejected_submits += 1;
        self.last_rejection = Some(blocker);
    }

    pub fn is_in_flight(&self, request_id: u64) -> bool {
        self.in_flight == Some(request_id)
    }

    /// Return to `Idle`, recording the failure text when there is one.
    pub fn finish(&mut self, error: Option<String>) {
        self.in_flight = None;
        self.last_error = error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_clears_previous_error() {
        let mut lifecycle = RequestLifecycle::new();
        let first = lifecycle.begin();
        lifecycle.finish(Some("Server error: 500".into()));
        assert_eq!(lifecycle.last_error(), Some("Server error: 500"));
        assert_eq!(lifecycle.state(), RequestState::Idle);

        let second = lifecycle.begin();
        assert_ne!(first, second);
        assert_eq!(lifecycle.last_error(), None);
        assert_eq!(lifecycle.state(), RequestState::Sending);
    }

    #[test]
    fn only_current_request_is_in_flight() {
        let mut lifecycle = RequestLifecycle::new();
        let id = lifecycle.begin();
        assert!(lifecycle.is_in_flight(id));
        assert!(!lifecycle.is_in_flight(id + 1));
        lifecycle.finish(None);
        assert!(!lifecycle.is_in_flight(id));
    }

    #[test]
    fn rejections_are_counted_without_touching_state() {
        let mut lifecycle = RequestLifecycle::new();
        lifecycle.begin();
        lifecycle.reject(SubmitBlocker::RequestInFlight);
        lifecycle.reject(SubmitBlocker::RequestInFlight);
        assert_eq!(lifecycle.rejected_submits(), 2);
        assert_eq!(
            lifecycle.last_rejection(),
            Some(SubmitBlocker::RequestInFlight)
        );
        assert!(lifecycle.is_sending());
    }
}
