use super::*;
use crate::bridge::LightRecord;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Recording gateway double: serves a fixed listing and captures every
/// update call.
struct MockGateway {
    lights: HashMap<String, LightRecord>,
    fail_listing: Option<String>,
    fail_update: Option<String>,
    list_calls: AtomicUsize,
    updates: Mutex<Vec<(String, LightUpdate)>>,
}

impl MockGateway {
    fn with_light(id: &str) -> Self {
        let mut lights = HashMap::new();
        lights.insert(
            id.to_string(),
            LightRecord {
                id: id.to_string(),
                name: Some("Desk lamp".to_string()),
                on: false,
                brightness: Some(100.0),
                mirek: Some(153),
            },
        );
        Self {
            lights,
            fail_listing: None,
            fail_update: None,
            list_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }

    fn empty() -> Self {
        Self {
            lights: HashMap::new(),
            fail_listing: None,
            fail_update: None,
            list_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }

    fn recorded_updates(&self) -> Vec<(String, LightUpdate)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl LightGateway for MockGateway {
    async fn list_lights(&self) -> Result<HashMap<String, LightRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(cause) = &self.fail_listing {
            return Err(anyhow!("{}", cause));
        }
        Ok(self.lights.clone())
    }

    async fn update_light(&self, id: &str, update: &LightUpdate) -> Result<()> {
        if let Some(cause) = &self.fail_update {
            return Err(anyhow!("{}", cause));
        }
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), update.clone()));
        Ok(())
    }
}

fn controller(gateway: Arc<MockGateway>, target_id: &str) -> LightController {
    LightController::new(gateway, target_id.to_string())
}

fn request(on: bool, mirek: Option<i64>, brightness: Option<f32>) -> LightStateRequest {
    LightStateRequest { on, mirek, brightness }
}

#[tokio::test]
async fn test_apply_issues_exactly_one_update_with_requested_fields() {
    let gateway = Arc::new(MockGateway::with_light("abc-123"));
    let controller = controller(gateway.clone(), "abc-123");

    controller
        .apply(&request(true, Some(200), Some(50.0)))
        .await
        .unwrap();

    let updates = gateway.recorded_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "abc-123");
    assert_eq!(
        updates[0].1,
        LightUpdate {
            on: Some(true),
            mirek: Some(200),
            brightness: Some(50.0),
        }
    );
}

#[tokio::test]
async fn test_apply_omits_absent_fields_from_update() {
    let gateway = Arc::new(MockGateway::with_light("abc-123"));
    let controller = controller(gateway.clone(), "abc-123");

    // Power-only request: color and brightness stay untouched
    controller.apply(&request(true, None, None)).await.unwrap();

    let updates = gateway.recorded_updates();
    assert_eq!(
        updates[0].1,
        LightUpdate {
            on: Some(true),
            mirek: None,
            brightness: None,
        }
    );
}

#[tokio::test]
async fn test_unmatched_target_is_not_found_and_no_update_issued() {
    let gateway = Arc::new(MockGateway::with_light("abc-123"));
    let controller = controller(gateway.clone(), "something-else");

    let err = controller
        .apply(&request(true, Some(200), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ControlError::TargetNotFound(_)));
    assert!(gateway.recorded_updates().is_empty());
}

#[tokio::test]
async fn test_empty_target_id_is_not_found_rather_than_a_crash() {
    let gateway = Arc::new(MockGateway::with_light("abc-123"));
    let controller = controller(gateway.clone(), "");

    let err = controller.apply(&request(false, None, None)).await.unwrap_err();

    assert!(matches!(err, ControlError::TargetNotFound(_)));
    assert!(gateway.recorded_updates().is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_gateway_unavailable_and_no_update_attempted() {
    let mut gateway = MockGateway::with_light("abc-123");
    gateway.fail_listing = Some("connection refused".to_string());
    let gateway = Arc::new(gateway);
    let controller = controller(gateway.clone(), "abc-123");

    let err = controller
        .apply(&request(true, Some(200), Some(50.0)))
        .await
        .unwrap_err();

    match err {
        ControlError::GatewayUnavailable(cause) => {
            assert!(cause.contains("connection refused"))
        }
        other => panic!("expected GatewayUnavailable, got {:?}", other),
    }
    assert!(gateway.recorded_updates().is_empty());
}

#[tokio::test]
async fn test_update_failure_carries_underlying_cause() {
    let mut gateway = MockGateway::with_light("abc-123");
    gateway.fail_update = Some("bridge returned 503".to_string());
    let gateway = Arc::new(gateway);
    let controller = controller(gateway.clone(), "abc-123");

    let err = controller
        .apply(&request(true, Some(200), Some(50.0)))
        .await
        .unwrap_err();

    match err {
        ControlError::UpdateFailed(cause) => assert!(cause.contains("bridge returned 503")),
        other => panic!("expected UpdateFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_light_on_bridge_at_all() {
    let gateway = Arc::new(MockGateway::empty());
    let controller = controller(gateway.clone(), "abc-123");

    let err = controller.apply(&request(true, None, None)).await.unwrap_err();
    assert!(matches!(err, ControlError::TargetNotFound(_)));
}

#[tokio::test]
async fn test_repeated_request_relists_and_reissues_identical_updates() {
    let gateway = Arc::new(MockGateway::with_light("abc-123"));
    let controller = controller(gateway.clone(), "abc-123");

    let desired = request(true, Some(200), Some(50.0));
    controller.apply(&desired).await.unwrap();
    controller.apply(&desired).await.unwrap();

    // No dedup: two listings, two identical update commands
    assert_eq!(gateway.list_calls.load(Ordering::SeqCst), 2);
    let updates = gateway.recorded_updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0], updates[1]);
}
