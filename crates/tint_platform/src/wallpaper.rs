//! Wallpaper collaborator
//!
//! Themes may carry their own wallpaper. Setting it asks the user which
//! screen(s) to use; both the question and the set operation answer through
//! single-shot channels so the caller can await them with a timeout. Dropping
//! a sender without answering means the user dismissed the request.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::resources::Drawable;
use crate::{PlatformError, Result};

/// Screen(s) a wallpaper is set on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperDestination {
    Home,
    Lock,
    Both,
}

/// Wallpaper bundled with a theme in the stub package
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallpaperInfo {
    /// Stub package the wallpaper lives in
    pub stub_package: String,
    /// Drawable resource name (`theme_wallpaper_<name>`)
    pub resource_name: String,
    /// Theme the wallpaper belongs to
    pub collection_id: String,
    pub asset: Drawable,
    pub title: Option<String>,
    pub attribution: Option<String>,
    pub action_url: Option<String>,
}

/// External wallpaper flow
pub trait WallpaperCollaborator: Send + Sync {
    /// Ask the user where to set the wallpaper
    fn request_destination(&self, message: &str, reply: oneshot::Sender<WallpaperDestination>);

    /// Set `wallpaper` on `destination`
    fn set_wallpaper(
        &self,
        wallpaper: &WallpaperInfo,
        destination: WallpaperDestination,
        done: oneshot::Sender<Result<()>>,
    );
}

/// A wallpaper set through [`MemoryWallpaper`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedWallpaper {
    pub resource_name: String,
    pub destination: WallpaperDestination,
}

/// Wallpaper collaborator answering with a preconfigured choice
///
/// A `None` choice drops the reply, which the apply flow treats as dismissal.
#[derive(Debug, Default)]
pub struct MemoryWallpaper {
    choice: Mutex<Option<WallpaperDestination>>,
    failure: Mutex<Option<String>>,
    applied: Mutex<Vec<AppliedWallpaper>>,
}

impl MemoryWallpaper {
    pub fn new(choice: Option<WallpaperDestination>) -> Self {
        Self {
            choice: Mutex::new(choice),
            ..Self::default()
        }
    }

    pub fn set_choice(&self, choice: Option<WallpaperDestination>) {
        *self.choice.lock().unwrap() = choice;
    }

    /// Make subsequent set operations fail with `reason`
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(reason.into());
    }

    pub fn applied(&self) -> Vec<AppliedWallpaper> {
        self.applied.lock().unwrap().clone()
    }
}

impl WallpaperCollaborator for MemoryWallpaper {
    fn request_destination(&self, message: &str, reply: oneshot::Sender<WallpaperDestination>) {
        tracing::debug!("wallpaper destination requested: {message}");
        if let Some(choice) = *self.choice.lock().unwrap() {
            let _ = reply.send(choice);
        }
    }

    fn set_wallpaper(
        &self,
        wallpaper: &WallpaperInfo,
        destination: WallpaperDestination,
        done: oneshot::Sender<Result<()>>,
    ) {
        if let Some(reason) = self.failure.lock().unwrap().clone() {
            let _ = done.send(Err(PlatformError::WallpaperSetFailed(reason)));
            return;
        }
        self.applied.lock().unwrap().push(AppliedWallpaper {
            resource_name: wallpaper.resource_name.clone(),
            destination,
        });
        let _ = done.send(Ok(()));
    }
}
