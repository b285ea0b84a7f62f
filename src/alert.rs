//! Best-effort alerting.
//!
//! Alerts are fire-and-forget: delivery failures are logged as soft
//! warnings and never propagate into a pipeline evaluation.

/// Destination for signal/breakout notifications.
pub trait AlertSink {
    fn notify(&self, text: &str);
}

/// Sink that drops every notification. Useful default for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AlertSink for NullSink {
    fn notify(&self, _text: &str) {}
}

/// ntfy.sh topic publisher.
#[derive(Debug, Clone)]
pub struct NtfySink {
    topic: String,
    title: Option<String>,
    http: reqwest::blocking::Client,
}

impl NtfySink {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: None,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Set the notification title header.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl AlertSink for NtfySink {
    fn notify(&self, text: &str) {
        let mut request = self
            .http
            .post(format!("https://ntfy.sh/{}", self.topic))
            .body(text.to_string());
        if let Some(title) = &self.title {
            request = request.header("Title", title.clone());
        }

        match request.send() {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(status = %response.status(), "alert delivery rejected");
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, "alert delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_swallows_everything() {
        NullSink.notify("wave breakout on BTC-USD");
    }

    #[test]
    fn test_ntfy_sink_builder() {
        let sink = NtfySink::new("market-zone").with_title("Market Zone");
        assert_eq!(sink.topic, "market-zone");
        assert_eq!(sink.title.as_deref(), Some("Market Zone"));
    }
}
