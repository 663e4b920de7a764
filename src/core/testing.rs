//! In-memory Canvas used by the traversal tests.

use crate::domain::model::{Module, ModuleItem};
use crate::domain::ports::CanvasApi;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Unregistered course ids answer 404 and unregistered item URLs answer 500.
#[derive(Default)]
pub struct MockCanvas {
    modules: HashMap<String, Vec<Module>>,
    items: HashMap<String, Vec<ModuleItem>>,
    calls: Mutex<Vec<String>>,
}

impl MockCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modules(mut self, course_id: &str, modules: Vec<Module>) -> Self {
        self.modules.insert(course_id.to_string(), modules);
        self
    }

    pub fn with_items(mut self, items_url: &str, items: Vec<ModuleItem>) -> Self {
        self.items.insert(items_url.to_string(), items);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CanvasApi for MockCanvas {
    async fn list_modules(&self, course_id: &str) -> Result<Vec<Module>> {
        self.record(format!("modules:{}", course_id));
        self.modules
            .get(course_id)
            .cloned()
            .ok_or_else(|| EtlError::HttpStatusError {
                url: format!("mock://courses/{}/modules", course_id),
                status: 404,
            })
    }

    async fn list_items(&self, items_url: &str) -> Result<Vec<ModuleItem>> {
        self.record(format!("items:{}", items_url));
        self.items
            .get(items_url)
            .cloned()
            .ok_or_else(|| EtlError::HttpStatusError {
                url: items_url.to_string(),
                status: 500,
            })
    }
}

pub fn module(id: u64, name: &str, items_url: &str) -> Module {
    Module {
        id: Some(id.into()),
        name: Some(name.to_string()),
        items_url: Some(items_url.to_string()),
    }
}

/// An item whose URL sits where Canvas puts it for that item type.
pub fn item(kind: &str, title: &str, url: &str) -> ModuleItem {
    let mut item = ModuleItem {
        kind: Some(kind.to_string()),
        title: Some(title.to_string()),
        ..Default::default()
    };
    if kind == ModuleItem::EXTERNAL_URL {
        item.external_url = Some(url.to_string());
    } else {
        item.html_url = Some(url.to_string());
    }
    item
}
