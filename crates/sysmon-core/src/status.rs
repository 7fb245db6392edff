//! Connectivity state of the dashboard backend

use crate::display::{OFFLINE_LABEL, ONLINE_LABEL};

/// The poller's belief about whether the backend is reachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    pub fn from_online(online: bool) -> Self {
        if online {
            Self::Online
        } else {
            Self::Offline
        }
    }

    pub fn is_online(self) -> bool {
        self == Self::Online
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => ONLINE_LABEL,
            Self::Offline => OFFLINE_LABEL,
        }
    }
}
