use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::{json, Value};

use crate::quiz::QuizSession;

pub const QUIZ_PAGE: &str = "quiz";

/// Event shape shared with the website's analytics layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub page: String,
    pub event: String,
    #[serde(rename = "formData", skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Value>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl TrackedEvent {
    pub fn new(page: &str, event: &str, form_data: Option<Value>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        Self {
            page: page.to_string(),
            event: event.to_string(),
            form_data,
            timestamp,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: &TrackedEvent);
}

pub struct LogSink;

impl EventSink for LogSink {
    fn record(&self, event: &TrackedEvent) {
        info!("[{}] {}", event.page, event.event);
        if let Some(form_data) = &event.form_data {
            debug!("formData: {}", form_data);
        }
    }
}

/// Posts each event as JSON. Delivery is best-effort: no retry, failures are only logged.
pub struct WebhookSink {
    client: Client,
    url: Url,
}

impl WebhookSink {
    pub fn new(url: Url) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, url }
    }
}

impl EventSink for WebhookSink {
    fn record(&self, event: &TrackedEvent) {
        let request = self.client.post(self.url.clone()).json(event);
        let name = event.event.clone();
        tokio::spawn(async move {
            match request.send().await.and_then(|response| response.error_for_status()) {
                Ok(_) => debug!("Webhook accepted {}", name),
                Err(err) => warn!("Webhook delivery of {} failed: {}", name, err),
            }
        });
    }
}

#[derive(Default)]
pub struct Analytics {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn track(&self, page: &str, event: &str, form_data: Option<Value>) {
        let event = TrackedEvent::new(page, event, form_data);
        for sink in &self.sinks {
            sink.record(&event);
        }
    }

    pub fn track_completion(&self, session: &QuizSession) {
        self.track(QUIZ_PAGE, "quiz_completed", Some(completion_form_data(session)));
    }
}

pub fn completion_form_data(session: &QuizSession) -> Value {
    let answers = &session.answers;
    let contact = &session.contact;
    json!({
        "firstName": contact.first_name,
        "email": contact.email,
        "cellNumber": contact.cell_number,
        "businessType": answers.business_type,
        "leadTracking": answers.lead_tracking,
        "headaches": answers.headaches,
        "leadCapacity": answers.lead_capacity,
        "revenue": answers.revenue,
        "priority": answers.priority,
        "magicWand": answers.magic_wand,
        "scores": session.scores(),
        "bottleneck": session.bottleneck().label(),
    })
}
