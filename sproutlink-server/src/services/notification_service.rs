use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::{Duration, OffsetDateTime};

use sproutlink_api::models::{AlertDecision, Metric};

/// One message in the shape the Expo push gateway accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, messages: Vec<PushMessage>) -> Result<(), anyhow::Error>;
}

/// Delivers push message batches to an Expo-compatible HTTP endpoint.
pub struct ExpoPushSender {
    client: reqwest::Client,
    endpoint: String,
}

impl ExpoPushSender {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl PushSender for ExpoPushSender {
    async fn send(&self, messages: Vec<PushMessage>) -> Result<(), anyhow::Error> {
        self.client
            .post(&self.endpoint)
            .json(&messages)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Alert sink: validates the push destination, applies the repeat-alert
/// cool-down and hands message batches to the sender. A missing or
/// malformed destination skips delivery silently; delivery failures are
/// logged and never propagate to the ingest request.
pub struct NotificationService {
    sender: Arc<dyn PushSender>,
    cooldown: Duration,
    last_alert: RwLock<HashMap<(i32, Metric), OffsetDateTime>>,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn PushSender>, cooldown_seconds: u64) -> Self {
        Self {
            sender,
            cooldown: Duration::seconds(cooldown_seconds as i64),
            last_alert: RwLock::new(HashMap::new()),
        }
    }

    /// Expo push tokens look like `ExponentPushToken[xxxx]` (the older
    /// `ExpoPushToken[xxxx]` prefix is also accepted).
    pub fn is_valid_push_token(token: &str) -> bool {
        let inner = token
            .strip_prefix("ExponentPushToken[")
            .or_else(|| token.strip_prefix("ExpoPushToken["))
            .and_then(|rest| rest.strip_suffix(']'));

        matches!(inner, Some(inner) if !inner.is_empty())
    }

    /// Returns how many messages were handed to the sender.
    pub async fn dispatch(
        &self,
        device_id: i32,
        device_uuid: &str,
        push_token: Option<&str>,
        alerts: &[AlertDecision],
    ) -> usize {
        let Some(token) = push_token else {
            tracing::debug!(device = device_uuid, "no push destination, skipping delivery");
            return 0;
        };

        if !Self::is_valid_push_token(token) {
            tracing::debug!(
                device = device_uuid,
                "malformed push destination, skipping delivery"
            );
            return 0;
        }

        let now = OffsetDateTime::now_utc();
        let mut messages = Vec::new();

        {
            let mut last_alert = self.last_alert.write().expect("cooldown lock poisoned");

            for alert in alerts.iter().filter(|alert| alert.should_notify) {
                let key = (device_id, alert.metric);

                if !self.cooldown.is_zero() {
                    if let Some(last) = last_alert.get(&key) {
                        if now - *last < self.cooldown {
                            continue;
                        }
                    }
                }

                last_alert.insert(key, now);
                messages.push(PushMessage {
                    to: token.to_string(),
                    sound: "default".to_string(),
                    title: alert.metric.alert_title().to_string(),
                    body: alert.message.clone(),
                    data: json!({
                        "uuid": device_uuid,
                        "metric": alert.metric,
                        "value": alert.current_value,
                    }),
                });
            }
        }

        if messages.is_empty() {
            return 0;
        }

        let count = messages.len();

        if let Err(e) = self.sender.send(messages).await {
            tracing::warn!(device = device_uuid, "push delivery failed: {}", e);
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use sproutlink_api::models::Range;

    use crate::tests::RecordingSender;

    use super::*;

    fn moisture_alert() -> AlertDecision {
        AlertDecision {
            metric: Metric::Moisture,
            current_value: 150.0,
            range: Range::new(200.0, 600.0),
            should_notify: true,
            message: "Moisture is out of range! Current: 150 (Allowed: 200 - 600)".to_string(),
        }
    }

    #[test]
    fn test_push_token_validation() {
        assert!(NotificationService::is_valid_push_token(
            "ExponentPushToken[abc123]"
        ));
        assert!(NotificationService::is_valid_push_token(
            "ExpoPushToken[abc123]"
        ));
        assert!(!NotificationService::is_valid_push_token(
            "ExponentPushToken[]"
        ));
        assert!(!NotificationService::is_valid_push_token("abc123"));
        assert!(!NotificationService::is_valid_push_token(
            "ExponentPushToken[abc123"
        ));
    }

    #[tokio::test]
    async fn test_dispatch_without_destination_skips_silently() {
        let sender = Arc::new(RecordingSender::new());
        let service = NotificationService::new(sender.clone(), 0);

        let sent = service
            .dispatch(1, "pot-uuid", None, &[moisture_alert()])
            .await;

        assert_eq!(sent, 0);
        assert!(sender.sent().is_empty());

        let sent = service
            .dispatch(1, "pot-uuid", Some("not-a-token"), &[moisture_alert()])
            .await;

        assert_eq!(sent, 0);
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_builds_expo_message() {
        let sender = Arc::new(RecordingSender::new());
        let service = NotificationService::new(sender.clone(), 0);

        let sent = service
            .dispatch(
                1,
                "pot-uuid",
                Some("ExponentPushToken[abc123]"),
                &[moisture_alert()],
            )
            .await;

        assert_eq!(sent, 1);

        let messages = sender.sent();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "ExponentPushToken[abc123]");
        assert_eq!(messages[0].title, "Moisture Alert");
        assert_eq!(messages[0].sound, "default");
        assert_eq!(
            messages[0].body,
            "Moisture is out of range! Current: 150 (Allowed: 200 - 600)"
        );
    }

    #[tokio::test]
    async fn test_cooldown_suppresses_repeat_alerts() {
        let sender = Arc::new(RecordingSender::new());
        let service = NotificationService::new(sender.clone(), 60);

        let first = service
            .dispatch(
                1,
                "pot-uuid",
                Some("ExponentPushToken[abc123]"),
                &[moisture_alert()],
            )
            .await;
        let second = service
            .dispatch(
                1,
                "pot-uuid",
                Some("ExponentPushToken[abc123]"),
                &[moisture_alert()],
            )
            .await;

        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(sender.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_cooldown_fires_every_time() {
        let sender = Arc::new(RecordingSender::new());
        let service = NotificationService::new(sender.clone(), 0);

        for _ in 0..3 {
            service
                .dispatch(
                    1,
                    "pot-uuid",
                    Some("ExponentPushToken[abc123]"),
                    &[moisture_alert()],
                )
                .await;
        }

        assert_eq!(sender.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_cooldown_is_scoped_per_device() {
        let sender = Arc::new(RecordingSender::new());
        let service = NotificationService::new(sender.clone(), 60);

        let first = service
            .dispatch(
                1,
                "pot-a",
                Some("ExponentPushToken[abc123]"),
                &[moisture_alert()],
            )
            .await;
        let other_device = service
            .dispatch(
                2,
                "pot-b",
                Some("ExponentPushToken[def456]"),
                &[moisture_alert()],
            )
            .await;

        assert_eq!(first, 1);
        assert_eq!(other_device, 1);
    }
}
