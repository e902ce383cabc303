//! Selection state carried between pages.
//!
//! Pages never share memory: whatever one page chose is written to the
//! session store under well-known keys and read back by the next page.

use anyhow::Result;
use serde::Serialize;

use crate::impact::UploadType;
use crate::navigation::UpdateMethod;
use crate::session::SessionStore;

/// Session keys
pub const SELECTED_METHOD_KEY: &str = "selectedMethod";
pub const SELECTED_APP_KEY: &str = "selectedApp";
pub const UPLOAD_TYPE_KEY: &str = "uploadType";
pub const UPLOAD_VERSION_KEY: &str = "uploadVersion";
pub const IMPACTED_COUNT_KEY: &str = "impactedCount";

/// The choices made so far in the update flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Raw stored method id; may name a method that no longer exists
    pub selected_method: Option<String>,
    pub selected_app: Option<String>,
    pub upload_type: Option<UploadType>,
    pub upload_version: Option<String>,
    /// Number of workflows the current upload impacts
    pub impacted_count: Option<usize>,
}

impl SelectionState {
    /// Read the selection a previous page left in the store
    pub fn from_store(store: &SessionStore) -> Self {
        let owned = |key: &str| store.get(key).map(str::to_string);
        Self {
            selected_method: owned(SELECTED_METHOD_KEY),
            selected_app: owned(SELECTED_APP_KEY),
            upload_type: store.get(UPLOAD_TYPE_KEY).and_then(|v| v.parse().ok()),
            upload_version: owned(UPLOAD_VERSION_KEY),
            impacted_count: store.get(IMPACTED_COUNT_KEY).and_then(|v| v.parse().ok()),
        }
    }

    /// Write every field to the store; unset fields are removed
    pub fn persist(&self, store: &mut SessionStore) -> Result<()> {
        let upload_type = self.upload_type.map(|t| t.as_str().to_string());
        let impacted = self.impacted_count.map(|n| n.to_string());

        let fields: [(&str, Option<&str>); 5] = [
            (SELECTED_METHOD_KEY, self.selected_method.as_deref()),
            (SELECTED_APP_KEY, self.selected_app.as_deref()),
            (UPLOAD_TYPE_KEY, upload_type.as_deref()),
            (UPLOAD_VERSION_KEY, self.upload_version.as_deref()),
            (IMPACTED_COUNT_KEY, impacted.as_deref()),
        ];

        for (key, value) in fields {
            match value {
                Some(value) => store.set(key, value)?,
                None => store.remove(key)?,
            }
        }
        Ok(())
    }

    /// The stored method, if it names a known one
    pub fn method(&self) -> Option<UpdateMethod> {
        self.selected_method
            .as_deref()
            .and_then(UpdateMethod::from_id)
    }

    pub fn select_method(&mut self, method: UpdateMethod) {
        self.selected_method = Some(method.id().to_string());
    }

    /// Record the upload under review and how many workflows it impacts
    pub fn set_upload(
        &mut self,
        app: &str,
        upload_type: UploadType,
        upload_version: &str,
        impacted_count: usize,
    ) {
        self.selected_app = Some(app.to_string());
        self.upload_type = Some(upload_type);
        self.upload_version = Some(upload_version.to_string());
        self.impacted_count = Some(impacted_count);
    }

    /// Forget the upload, e.g. when the highlighted app has no versions
    pub fn clear_upload(&mut self) {
        self.selected_app = None;
        self.upload_type = None;
        self.upload_version = None;
        self.impacted_count = None;
    }

    pub fn has_upload(&self) -> bool {
        self.selected_app.is_some() && self.upload_version.is_some()
    }
}
