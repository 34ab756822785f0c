//! JSON values in the browser's local storage.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::StorageError;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

#[cfg(not(target_arch = "wasm32"))]
fn local_storage() -> Option<web_sys::Storage> {
    None
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Write(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

pub fn read_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    let storage = local_storage().ok_or(StorageError::Unavailable)?;
    match storage.get_item(key).ok().flatten() {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let storage = local_storage().ok_or(StorageError::Unavailable)?;
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw).map_err(js_error)
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_targets_report_unavailable_storage() {
        assert!(matches!(
            read_json::<String>("anything"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(
            write_json("anything", &1),
            Err(StorageError::Unavailable)
        ));
    }
}
