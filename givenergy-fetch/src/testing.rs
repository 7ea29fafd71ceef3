//! In-memory host for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use givenergy_core::{BatteryFlow, PageLinks, PageMeta, PageResponse, Reading};

use crate::error::RequestError;
use crate::host::{HostApi, HostResponse, RequestOptions};

/// Host serving canned bodies by exact URL, recording every call.
#[derive(Default)]
pub(crate) struct MockHost {
    pages: HashMap<String, (String, Duration)>,
    env: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
    logs: Mutex<Vec<String>>,
}

impl MockHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.with_delayed_page(url, body, Duration::ZERO)
    }

    pub(crate) fn with_delayed_page(
        mut self,
        url: &str,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.pages.insert(url.to_string(), (body.into(), delay));
        self
    }

    /// URLs in the order they were requested.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// URLs in the order their responses were delivered.
    pub(crate) fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    pub(crate) fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostApi for MockHost {
    async fn fetch_text(
        &self,
        url: &str,
        _options: &RequestOptions,
    ) -> Result<HostResponse, RequestError> {
        self.calls.lock().unwrap().push(url.to_string());

        let Some((body, delay)) = self.pages.get(url) else {
            return Err(RequestError::Transport {
                url: url.to_string(),
                message: "no route".to_string(),
            });
        };
        if !delay.is_zero() {
            tokio::time::sleep(*delay).await;
        }

        self.completed.lock().unwrap().push(url.to_string());
        Ok(HostResponse::ok(body.clone()))
    }

    fn env(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn log_info(&self, message: &str) {
        self.logs.lock().unwrap().push(message.to_string());
    }
}

/// A page body with one reading per timestamp.
///
/// Solar power encodes the timestamp's position so merged output can be
/// checked for ordering.
pub(crate) fn page_json(times: &[&str], meta: Option<(u32, &str)>, next: Option<&str>) -> String {
    let data = times
        .iter()
        .map(|time| {
            let minute = time[14..16].parse::<f64>().unwrap_or(0.0);
            Reading::new(*time, minute, -minute, BatteryFlow::new(minute, 50.0), 100.0 + minute)
        })
        .collect();

    let page = PageResponse {
        data,
        meta: meta.map(|(last_page, path)| PageMeta {
            current_page: None,
            last_page: Some(last_page),
            path: Some(path.to_string()),
        }),
        links: Some(PageLinks {
            next: next.map(str::to_string),
        }),
    };
    serde_json::to_string(&page).unwrap()
}
