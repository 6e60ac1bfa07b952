//! Android manifest / iOS Info.plist permission patching.
//!
//! Both documents are handled in their JSON rendering: the manifest in the
//! xml2js shape used by the mobile build tooling
//! (`{"manifest": {"uses-permission": [{"$": {"android:name": "..."}}]}}`) and
//! the Info.plist as a flat dictionary. Every function here is idempotent.

use serde_json::{json, Map, Value};

const ANDROID_NAME: &str = "android:name";
const USES_PERMISSION: &str = "uses-permission";

/// Permissions the livestream features need on Android.
pub const ANDROID_PERMISSIONS: [&str; 6] = [
    "android.permission.CAMERA",
    "android.permission.RECORD_AUDIO",
    "android.permission.MODIFY_AUDIO_SETTINGS",
    "android.permission.INTERNET",
    "android.permission.ACCESS_NETWORK_STATE",
    "android.permission.WAKE_LOCK",
];

/// Usage descriptions shown by iOS before camera and microphone access.
pub const IOS_USAGE_DESCRIPTIONS: [(&str, &str); 2] = [
    (
        "NSCameraUsageDescription",
        "Allow $(PRODUCT_NAME) to use your camera to go live and try on products.",
    ),
    (
        "NSMicrophoneUsageDescription",
        "Allow $(PRODUCT_NAME) to use your microphone during livestreams.",
    ),
];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PermissionError {
    #[error("manifest has no `manifest` object at the root")]
    MissingManifest,
    #[error("`{USES_PERMISSION}` must be a list")]
    PermissionsNotAList,
    #[error("Info.plist must be a dictionary")]
    PlistNotADictionary,
}

fn permission_name(entry: &Value) -> Option<&str> {
    entry.get("$")?.get(ANDROID_NAME)?.as_str()
}

/// Appends every permission that is not declared yet (exact name match).
/// Existing entries and their order are left untouched. Returns the names added.
pub fn ensure_android_permissions(
    manifest: &mut Value,
    permissions: &[&str],
) -> Result<Vec<String>, PermissionError> {
    let root = manifest
        .get_mut("manifest")
        .and_then(Value::as_object_mut)
        .ok_or(PermissionError::MissingManifest)?;

    let entries = root
        .entry(USES_PERMISSION)
        .or_insert_with(|| Value::Array(vec![]))
        .as_array_mut()
        .ok_or(PermissionError::PermissionsNotAList)?;

    let mut added = vec![];
    for permission in permissions {
        let present = entries
            .iter()
            .any(|entry| permission_name(entry) == Some(*permission));
        if present {
            continue;
        }

        entries.push(json!({ "$": { ANDROID_NAME: permission } }));
        added.push(permission.to_string());
    }

    Ok(added)
}

/// Sets each usage description only when the key is absent. An existing
/// description is never overwritten. Returns the keys added.
pub fn ensure_ios_usage_descriptions(
    plist: &mut Value,
    descriptions: &[(&str, &str)],
) -> Result<Vec<String>, PermissionError> {
    let dict: &mut Map<String, Value> = plist
        .as_object_mut()
        .ok_or(PermissionError::PlistNotADictionary)?;

    let mut added = vec![];
    for (key, description) in descriptions {
        if dict.contains_key(*key) {
            continue;
        }
        dict.insert(key.to_string(), Value::String(description.to_string()));
        added.push(key.to_string());
    }

    Ok(added)
}
