#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::oneshot;
use vitalboard_client::gateway::{GatewayError, LayoutGateway};
use vitalboard_client::store::LayoutStore;
use vitalboard_core::defaults::default_widgets;
use vitalboard_core::widget::{DashboardLayoutData, WidgetCategory, WidgetConfig, WidgetType};

/// Scripted in-memory gateway.
///
/// Responses are computed when a request arrives. A request can then be
/// held in flight with [`MockGateway::hold_next`] until the test releases
/// it, which lets tests interleave overlapping operations.
#[derive(Default)]
pub struct MockGateway {
    stored: Mutex<Option<DashboardLayoutData>>,
    holds: Mutex<VecDeque<Hold>>,
    pub fail_fetch: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_reset: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub reset_calls: AtomicUsize,
    pub last_saved: Mutex<Option<Vec<WidgetConfig>>>,
}

struct Hold {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test side of a held request.
pub struct HoldHandle {
    entered: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl HoldHandle {
    /// Wait until the held request has reached the gateway.
    pub async fn entered(&mut self) {
        (&mut self.entered).await.unwrap();
    }

    /// Let the held request complete.
    pub fn release(self) {
        let _ = self.release.send(());
    }
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_layout(widgets: Vec<WidgetConfig>) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.stored.lock().unwrap() = Some(DashboardLayoutData {
            widgets,
            last_modified: Utc::now(),
        });
        Arc::new(gateway)
    }

    pub fn stored(&self) -> Option<DashboardLayoutData> {
        self.stored.lock().unwrap().clone()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_resets(&self, fail: bool) {
        self.fail_reset.store(fail, Ordering::SeqCst);
    }

    pub fn saves(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }

    /// Hold the next request (of any kind) in flight.
    pub fn hold_next(&self) -> HoldHandle {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.holds.lock().unwrap().push_back(Hold {
            entered: entered_tx,
            release: release_rx,
        });
        HoldHandle {
            entered: entered_rx,
            release: release_tx,
        }
    }

    async fn maybe_hold(&self) {
        let hold = self.holds.lock().unwrap().pop_front();
        if let Some(hold) = hold {
            let _ = hold.entered.send(());
            let _ = hold.release.await;
        }
    }

    fn store(&self, widgets: Vec<WidgetConfig>) -> DashboardLayoutData {
        let data = DashboardLayoutData {
            widgets,
            last_modified: Utc::now(),
        };
        *self.stored.lock().unwrap() = Some(data.clone());
        data
    }
}

#[async_trait]
impl LayoutGateway for MockGateway {
    async fn fetch_layout(&self) -> Result<Option<DashboardLayoutData>, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_fetch.load(Ordering::SeqCst) {
            Err(unavailable("fetch refused"))
        } else {
            Ok(self.stored())
        };
        self.maybe_hold().await;
        result
    }

    async fn save_layout(&self, widgets: &[WidgetConfig]) -> Result<DashboardLayoutData, GatewayError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_save.load(Ordering::SeqCst) {
            Err(unavailable("save refused"))
        } else {
            *self.last_saved.lock().unwrap() = Some(widgets.to_vec());
            Ok(self.store(widgets.to_vec()))
        };
        self.maybe_hold().await;
        result
    }

    async fn reset_layout(&self) -> Result<DashboardLayoutData, GatewayError> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_reset.load(Ordering::SeqCst) {
            Err(unavailable("reset refused"))
        } else {
            Ok(self.store(default_widgets()))
        };
        self.maybe_hold().await;
        result
    }
}

fn unavailable(body: &str) -> GatewayError {
    GatewayError::Api {
        status: 503,
        body: body.to_string(),
    }
}

/// Visible widget with the given id.
pub fn widget(id: &str) -> WidgetConfig {
    WidgetConfig::new(id, WidgetType::Vitals, WidgetCategory::Vitals).sized(1, 1)
}

/// Ids of a widget list, in order.
pub fn ids(widgets: &[WidgetConfig]) -> Vec<String> {
    widgets.iter().map(|w| w.id.clone()).collect()
}

/// Store backed by `gateway`, already loaded.
pub async fn loaded_store(gateway: Arc<MockGateway>) -> Arc<LayoutStore> {
    let store = Arc::new(LayoutStore::new(gateway));
    store.load().await.unwrap();
    store
}
