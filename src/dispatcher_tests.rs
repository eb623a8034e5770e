#[cfg(test)]
mod tests {
    use crate::alarm::Alarm;
    use crate::dispatcher::NotificationDispatcher;
    use crate::event::{NotificationBatch, NotificationRecord};
    use crate::notifier::MessageSender;
    use crate::render::RenderedMessage;
    use crate::timestamp::{parse_delivery_time, parse_state_change_time};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    // Mock sender recording every message it receives
    struct MockSender {
        call_count: Arc<AtomicUsize>,
        sent: Arc<Mutex<Vec<RenderedMessage>>>,
    }

    impl MockSender {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<Mutex<Vec<RenderedMessage>>>) {
            let call_count = Arc::new(AtomicUsize::new(0));
            let sent = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    call_count: call_count.clone(),
                    sent: sent.clone(),
                },
                call_count,
                sent,
            )
        }
    }

    #[async_trait]
    impl MessageSender for MockSender {
        async fn send(&self, message: &RenderedMessage) -> Result<()> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().await.push(message.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    // Mock sender whose transport always fails
    struct FailingSender;

    #[async_trait]
    impl MessageSender for FailingSender {
        async fn send(&self, _message: &RenderedMessage) -> Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn message(name: &str, state: &str) -> String {
        json!({
            "AlarmName": name,
            "AlarmDescription": format!("{} description", name),
            "NewStateValue": state,
            "NewStateReason": "Threshold Crossed",
            "StateChangeTime": "2024-03-05T13:23:01.000+0000"
        })
        .to_string()
    }

    fn record(body: String) -> NotificationRecord {
        NotificationRecord::new("2024-03-05T13:24:00.000Z", body)
    }

    fn batch(records: Vec<NotificationRecord>) -> NotificationBatch {
        NotificationBatch { records }
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let (sender, call_count, _) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), true);

        let batch: NotificationBatch = serde_json::from_str(r#"{"Records": []}"#).unwrap();
        let processed = dispatcher.process_batch(&batch).await.unwrap();

        assert!(!processed);
        assert_eq!(call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_valid_record() {
        let (sender, call_count, sent) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), true);

        let processed = dispatcher
            .process_batch(&batch(vec![record(message("cpu", "ALARM"))]))
            .await
            .unwrap();

        assert!(processed);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        let sent = sent.lock().await;
        assert_eq!(sent[0].attachments[0].pretext, "@here cpu description");
    }

    #[tokio::test]
    async fn test_only_record_malformed() {
        let (sender, call_count, _) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), true);

        let mut body: serde_json::Value = serde_json::from_str(&message("cpu", "ALARM")).unwrap();
        body.as_object_mut().unwrap().remove("NewStateReason");

        let processed = dispatcher
            .process_batch(&batch(vec![record(body.to_string())]))
            .await
            .unwrap();

        assert!(!processed);
        assert_eq!(call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_record_does_not_abort_batch() {
        let (sender, call_count, sent) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), true);

        let mut broken: serde_json::Value = serde_json::from_str(&message("cpu", "ALARM")).unwrap();
        broken.as_object_mut().unwrap().remove("NewStateReason");

        let processed = dispatcher
            .process_batch(&batch(vec![
                record(broken.to_string()),
                record("{not json".to_string()),
                record(message("disk", "OK")),
            ]))
            .await
            .unwrap();

        assert!(processed);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert_eq!(sent.lock().await[0].attachments[0].fields[1].value, "disk");
    }

    #[tokio::test]
    async fn test_records_sent_in_batch_order() {
        let (sender, _, sent) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), true);

        dispatcher
            .process_batch(&batch(vec![
                record(message("first", "ALARM")),
                record(message("second", "OK")),
                record(message("third", "ALARM")),
            ]))
            .await
            .unwrap();

        let sent = sent.lock().await;
        let names: Vec<&str> = sent
            .iter()
            .map(|m| m.attachments[0].fields[1].value.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_non_alarming_records_filtered_without_all() {
        let (sender, call_count, _) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), false);

        let processed = dispatcher
            .process_batch(&batch(vec![record(message("cpu", "OK"))]))
            .await
            .unwrap();

        assert!(!processed);
        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        let processed = dispatcher
            .process_batch(&batch(vec![
                record(message("cpu", "OK")),
                record(message("disk", "ALARM")),
            ]))
            .await
            .unwrap();

        assert!(processed);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces() {
        let dispatcher = NotificationDispatcher::new(Arc::new(FailingSender), true);

        let result = dispatcher
            .process_batch(&batch(vec![record(message("cpu", "ALARM"))]))
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_dispatch_alarms() {
        let (sender, call_count, sent) = MockSender::new();
        let dispatcher = NotificationDispatcher::new(Arc::new(sender), false);

        let alarm = |name: &str, state: &str| Alarm {
            name: name.to_string(),
            description: String::new(),
            reason: "Threshold Crossed".to_string(),
            state: state.to_string(),
            state_change_time: parse_state_change_time("2024-03-05T13:23:01.000+0000").unwrap(),
        };
        let delivered_at = parse_delivery_time("2024-03-05T13:24:00.000Z").unwrap();

        let count = dispatcher
            .dispatch_alarms(&[alarm("cpu", "ALARM"), alarm("disk", "OK")], &delivered_at)
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert_eq!(sent.lock().await[0].attachments[0].ts, delivered_at.timestamp());
    }
}
