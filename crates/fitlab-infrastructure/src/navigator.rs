//! Navigator that records where the user was sent.

use fitlab_core::navigation::{Navigator, Route};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    last: Mutex<Option<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_route(&self) -> Option<Route> {
        self.last.lock().ok().and_then(|guard| *guard)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!("[Navigator] Navigating to {}", route);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_last_route() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.last_route(), None);

        navigator.navigate(Route::Lab);
        navigator.navigate(Route::Wall);
        assert_eq!(navigator.last_route(), Some(Route::Wall));
        assert_eq!(Route::Wall.to_string(), "/wall");
    }
}
