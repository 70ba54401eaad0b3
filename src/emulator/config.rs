// Configuration management
//
// Emulator settings persisted as TOML next to the working directory.
// Video settings are hints for whatever front end drives the core; the
// run section controls the headless CLI harness.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default configuration file path
const CONFIG_FILE: &str = "nescore.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Video hints for the front end
    pub video: VideoConfig,

    /// Headless run settings
    pub run: RunConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Video configuration (consumed by the front-end collaborator)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Window scale factor (1-4)
    pub scale: u32,

    /// Target FPS (60 for NTSC)
    pub fps: u32,

    /// Enable VSync
    pub vsync: bool,
}

/// Headless run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Frames the CLI harness emulates before exiting
    pub frames: u32,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Base directory for screenshots
    pub directory: PathBuf,

    /// Include a timestamp in the file name
    pub include_timestamp: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig {
                scale: 3,
                fps: 60,
                vsync: true,
            },
            run: RunConfig { frames: 60 },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
                include_timestamp: true,
            },
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration file, or create a default one
    ///
    /// A missing or unreadable file falls back to defaults, which are
    /// then written out on a best-effort basis.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| {
            let config = Self::default();
            let _ = config.save();
            config
        })
    }

    /// Load the configuration from disk
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save the configuration to disk
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}
