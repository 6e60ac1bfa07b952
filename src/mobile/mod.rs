pub mod permissions;

pub use permissions::{
    ensure_android_permissions, ensure_ios_usage_descriptions, PermissionError,
    ANDROID_PERMISSIONS, IOS_USAGE_DESCRIPTIONS,
};
