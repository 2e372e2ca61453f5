//! Navigation between top-level screens.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Top-level screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// The discovery feed.
    #[strum(serialize = "/wall")]
    Wall,
    /// The Lab workspace.
    #[strum(serialize = "/lab")]
    Lab,
    /// The user's profile and gallery.
    #[strum(serialize = "/profile")]
    Profile,
}

/// Moves the user to another screen.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
