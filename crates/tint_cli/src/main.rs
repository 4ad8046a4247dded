//! Tint CLI
//!
//! Drives the theme engine against a simulated device kept in plain files:
//! `tint.toml` (configuration), a resource catalog, and the device state.

mod config;
mod device;
mod project;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tint_platform::{MemoryWallpaper, ResourceCatalog, TracingLogger, WallpaperDestination};
use tint_theme::{ApplyError, Collaborators, ThemeBundle, ThemeManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TintConfig;
use crate::device::{DeviceServices, DeviceState};

#[derive(Parser)]
#[command(name = "tint", about = "Theme catalog and overlay manager", version)]
struct Cli {
    /// Project directory (holds tint.toml)
    #[arg(short = 'C', long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tint.toml with a sample catalog and device
    Init {
        /// Overwrite an existing project
        #[arg(long)]
        force: bool,
    },
    /// List themes, marking the active one
    List,
    /// Show enabled overlays and the stored selection
    Current,
    /// Apply a theme by title or list index
    Apply {
        theme: String,
        /// Where to set the theme wallpaper
        #[arg(long, value_enum, default_value = "both")]
        wallpaper: DestinationArg,
        /// Keep the current wallpaper
        #[arg(long)]
        no_wallpaper: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DestinationArg {
    Home,
    Lock,
    Both,
}

impl From<DestinationArg> for WallpaperDestination {
    fn from(arg: DestinationArg) -> Self {
        match arg {
            DestinationArg::Home => WallpaperDestination::Home,
            DestinationArg::Lock => WallpaperDestination::Lock,
            DestinationArg::Both => WallpaperDestination::Both,
        }
    }
}

/// Loaded project: configuration, device files, and a manager over them
struct Session {
    root: PathBuf,
    config: TintConfig,
    device: DeviceState,
    services: DeviceServices,
    wallpaper: Arc<MemoryWallpaper>,
    manager: ThemeManager,
}

impl Session {
    fn open(root: &Path, destination: Option<WallpaperDestination>) -> Result<Self> {
        let config = TintConfig::load_from_dir(root)?;
        let resources_path = config.resources_path(root);
        let resources = ResourceCatalog::load(&resources_path)
            .with_context(|| format!("Failed to load {}", resources_path.display()))?;
        let device = DeviceState::load(&config.device_path(root))?;

        let services = device.services();
        let wallpaper = Arc::new(MemoryWallpaper::new(destination));
        let manager = ThemeManager::new(
            Arc::new(resources),
            Collaborators {
                overlays: services.overlays.clone(),
                settings: services.settings.clone(),
                wallpaper: wallpaper.clone(),
                events: Arc::new(TracingLogger),
            },
            config.theme.clone(),
        );

        Ok(Self {
            root: root.to_path_buf(),
            config,
            device,
            services,
            wallpaper,
            manager,
        })
    }

    fn themes(&self) -> Result<Vec<ThemeBundle>> {
        let themes = self
            .manager
            .fetch_themes(false)
            .context("Failed to load theme catalog")?;
        Ok(themes.to_vec())
    }

    fn find(&self, query: &str) -> Result<ThemeBundle> {
        let themes = self.themes()?;
        if let Ok(index) = query.parse::<usize>() {
            if let Some(theme) = themes.get(index) {
                return Ok(theme.clone());
            }
        }
        themes
            .into_iter()
            .find(|t| t.title().eq_ignore_ascii_case(query))
            .with_context(|| format!("No theme named `{query}`. Run `tint list` to see themes."))
    }

    fn save(mut self) -> Result<()> {
        self.device.sync_from(&self.services);
        for applied in self.wallpaper.applied() {
            self.device
                .record_wallpaper(&applied.resource_name, applied.destination);
        }
        self.device.save(&self.config.device_path(&self.root))
    }
}

fn describe(theme: &ThemeBundle) -> String {
    if theme.overlay_packages().is_empty() {
        return "(platform)".to_string();
    }
    theme
        .overlay_packages()
        .iter()
        .map(|(category, package)| format!("{category}: {package}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_list(root: &Path) -> Result<()> {
    let session = Session::open(root, None)?;
    if !session.manager.is_available() {
        tracing::warn!("catalog declares no themes, only the default theme is listed");
    }

    for (index, theme) in session.themes()?.iter().enumerate() {
        let marker = if session.manager.is_active(theme) { "*" } else { " " };
        let mut title = theme.title().to_string();
        if theme.is_custom() {
            title.push_str(" (custom)");
        }
        println!("{marker} {index:>2}  {title:<20} {}", describe(theme));
    }
    Ok(())
}

fn cmd_current(root: &Path) -> Result<()> {
    let session = Session::open(root, None)?;

    let current = session.manager.current_overlays();
    println!("Enabled overlays:");
    if current.is_empty() {
        println!("  (none)");
    }
    for (category, package) in current.iter() {
        println!("  {category:<20} {package}");
    }

    match session.manager.stored_overlays() {
        Some(stored) => {
            let theme = session
                .manager
                .find_theme_by_packages(&stored)
                .context("Failed to load theme catalog")?;
            match theme {
                Some(theme) => println!("Stored selection: {}", theme.title()),
                None => println!("Stored selection: {} package(s), no matching theme", stored.len()),
            }
        }
        None => println!("Stored selection: (none)"),
    }
    Ok(())
}

async fn cmd_apply(
    root: &Path,
    query: &str,
    destination: WallpaperDestination,
    no_wallpaper: bool,
) -> Result<()> {
    let session = Session::open(root, Some(destination))?;
    let mut theme = session.find(query)?;
    if no_wallpaper {
        theme = theme.with_theme_wallpaper(false);
    }

    let result = session.manager.apply(&theme).await;
    match &result {
        Ok(report) => {
            println!("Applied {}", report.title);
            if let Some(destination) = report.wallpaper {
                println!("Wallpaper set on {destination:?}");
            }
        }
        Err(ApplyError::NotApplied { failed, .. }) => {
            for category in failed {
                eprintln!("  {category}: overlay toggle rejected");
            }
        }
        Err(_) => {}
    }

    // Partial applies stay applied, so the device file is written either way
    session.save()?;
    result.map(|_| ()).context("Theme apply failed")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Init { force } => project::create_project(&cli.dir, force),
        Commands::List => cmd_list(&cli.dir),
        Commands::Current => cmd_current(&cli.dir),
        Commands::Apply {
            theme,
            wallpaper,
            no_wallpaper,
        } => cmd_apply(&cli.dir, &theme, wallpaper.into(), no_wallpaper).await,
    }
}
