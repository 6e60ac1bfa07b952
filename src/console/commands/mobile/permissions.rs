use crate::console::commands::CallableTrait;
use crate::mobile;
use anyhow::Context;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// `console mobile permissions --manifest <json> [--info-plist <json>]`
///
/// Adds the camera/microphone/network permissions the livestream needs to the
/// JSON renderings of AndroidManifest.xml and Info.plist. Files are only
/// rewritten when something was added.
pub struct PermissionsCommand {
    pub manifest: PathBuf,
    pub info_plist: Option<PathBuf>,
}

impl PermissionsCommand {
    pub fn new(manifest: PathBuf, info_plist: Option<PathBuf>) -> Self {
        Self {
            manifest,
            info_plist,
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn write_json(path: &Path, value: &Value) -> anyhow::Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn report(file: &Path, added: &[String]) {
    if added.is_empty() {
        println!("{}: already up to date", file.display());
        return;
    }
    for entry in added {
        println!("{}: added {}", file.display(), entry);
    }
}

impl CallableTrait for PermissionsCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut manifest = read_json(&self.manifest)?;
        let added = mobile::ensure_android_permissions(&mut manifest, &mobile::ANDROID_PERMISSIONS)
            .with_context(|| format!("Cannot patch {}", self.manifest.display()))?;
        if !added.is_empty() {
            write_json(&self.manifest, &manifest)?;
        }
        report(&self.manifest, &added);

        if let Some(path) = &self.info_plist {
            let mut plist = read_json(path)?;
            let added =
                mobile::ensure_ios_usage_descriptions(&mut plist, &mobile::IOS_USAGE_DESCRIPTIONS)
                    .with_context(|| format!("Cannot patch {}", path.display()))?;
            if !added.is_empty() {
                write_json(path, &plist)?;
            }
            report(path, &added);
        }

        Ok(())
    }
}
