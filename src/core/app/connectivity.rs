use tracing::{info, warn};

use crate::api::ChatFailure;

/// Advisory surfaced when the startup probe fails.
pub const BACKEND_OFFLINE_ADVISORY: &str =
    "Backend server is not responding. Please make sure it is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendStatus::Checking => "checking",
            BackendStatus::Online => "online",
            BackendStatus::Offline => "offline",
        }
    }

    pub fn is_online(self) -> bool {
        self == BackendStatus::Online
    }

    pub fn is_offline(self) -> bool {
        self == BackendStatus::Offline
    }
}

/// Tracks the single liveness probe issued per orchestrator lifetime and the
/// advisory left behind when it fails. The advisory outlives any later send.
#[derive(Debug, Default)]
pub struct ConnectivityMonitor {
    status: BackendStatus,
    probe_issued: bool,
    advisory: Option<&'static str>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BackendStatus {
        self.status
    }

    pub fn advisory(&self) -> Option<&'static str> {
        self.advisory
    }

    /// Returns `true` the first time only; later calls are refused so the
    /// probe runs exactly once.
    pub fn begin_probe(&mut self) -> bool {
        if self.probe_issued {
            return false;
        }
        self.probe_issued = true;
        self.status = BackendStatus::Checking;
        true
    }

    pub fn record_probe(&mut self, result: Result<(), ChatFailure>) {
        match result {
            Ok(()) => {
                info!("Backend is online");
                self.status = BackendStatus::Online;
                self.advisory = None;
            }
            Err(failure) => {
                warn!(kind = failure.kind(), %failure, "Backend probe failed");
                self.status = BackendStatus::Offline;
                self.advisory = Some(BACKEND_OFFLINE_ADVISORY);
            }
        }
    }
}
