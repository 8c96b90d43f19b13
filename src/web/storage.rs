use crate::error::BackdropError;
use crate::menu::PreferenceStore;

/// `window.localStorage`, or nothing when storage is disabled (private
/// browsing, sandboxed frames). Reads then miss and writes report
/// [`BackdropError::Storage`].
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    /// Store backed by the window's local storage, if accessible.
    #[must_use]
    pub fn from_window(window: &web_sys::Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            log::debug!("localStorage unavailable, palette choice will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackdropError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| BackdropError::Storage("localStorage unavailable".to_owned()))?;
        storage
            .set_item(key, value)
            .map_err(|e| BackdropError::Storage(format!("{e:?}")))
    }
}
