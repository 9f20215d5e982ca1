/// Utility helpers for the LocalStream client

/// Generation stamp carried by an async request. A result is applied only
/// while its token is still the latest one issued by its tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
    target: String,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// What the request was issued for (server URL, stream URL, ...).
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Issues [`RequestToken`]s; issuing a new one supersedes every older one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestTracker {
    latest: u64,
    target: Option<String>,
}

impl RequestTracker {
    pub fn issue(&mut self, target: impl Into<String>) -> RequestToken {
        self.latest += 1;
        let target = target.into();
        self.target = Some(target.clone());
        RequestToken {
            generation: self.latest,
            target,
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        token.generation == self.latest && self.target.as_deref() == Some(token.target.as_str())
    }

    /// Drops whatever is in flight without issuing a replacement.
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue("http://a:8080");
        let second = tracker.issue("http://b:8080");
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn same_target_reissued_is_still_stale() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue("http://a:8080");
        let second = tracker.issue("http://a:8080");
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn invalidate_drops_in_flight() {
        let mut tracker = RequestTracker::default();
        let token = tracker.issue("http://a:8080");
        tracker.invalidate();
        assert!(!tracker.is_current(&token));
        assert_eq!(token.target(), "http://a:8080");
    }
}
