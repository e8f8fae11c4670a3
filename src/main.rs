//! Replays a script of input events against the demo app and prints the resulting state.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use sidemenu::animation::Clock;
use sidemenu::drawer::{
    DragSample, DragSource, DrawerController, DrawerId, Options, Page, StatusBarStyle,
};
use sidemenu::utils::geometry::{Point, Rectangle, Size};
use sidemenu_config::Config;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sidemenu")]
#[command(about = "Replay drawer input events and print the final state")]
struct Cli {
    /// Path to a KDL config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Container width in points.
    #[arg(long, default_value_t = 390.)]
    width: f64,
    /// Container height in points.
    #[arg(long, default_value_t = 844.)]
    height: f64,
    /// Print the state after every event.
    #[arg(short, long)]
    verbose: bool,
    /// JSON file with the list of events.
    script: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum ScriptEvent {
    DragBegin {
        source: DragSource,
    },
    DragMove {
        source: DragSource,
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    DragEnd {
        source: DragSource,
        dx: f64,
        #[serde(default)]
        vx: f64,
    },
    DragCancel {
        source: DragSource,
    },
    Tap,
    Toggle {
        open: bool,
        #[serde(default = "default_animated")]
        animated: bool,
    },
    Present {
        page: usize,
        #[serde(default = "default_animated")]
        animated: bool,
    },
    SelectMenuRow {
        row: usize,
    },
    Resize {
        width: f64,
        height: f64,
    },
    ResizeComplete,
    Advance {
        ms: u64,
    },
}

fn default_animated() -> bool {
    true
}

/// A page of the demo app.
#[derive(Debug)]
struct DemoPage {
    title: String,
    drawer: Option<DrawerId>,
    frame: Rectangle,
    style: StatusBarStyle,
}

impl DemoPage {
    fn new(title: impl Into<String>, style: StatusBarStyle) -> Self {
        Self {
            title: title.into(),
            drawer: None,
            frame: Rectangle::default(),
            style,
        }
    }
}

impl Page for DemoPage {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.title
    }

    fn set_drawer(&mut self, drawer: Option<DrawerId>) {
        self.drawer = drawer;
    }

    fn drawer(&self) -> Option<DrawerId> {
        self.drawer
    }

    fn set_frame(&mut self, frame: Rectangle) {
        self.frame = frame;
    }

    fn status_bar_style(&self) -> StatusBarStyle {
        self.style
    }
}

/// Menu rows of the demo app, each presenting the page with the same index.
const MENU_ROWS: usize = 3;

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sidemenu=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|err| anyhow::anyhow!("{err:?}"))?,
        None => Config::default(),
    };

    let script = fs::read_to_string(&cli.script)
        .with_context(|| format!("error reading {:?}", cli.script))?;
    let events: Vec<ScriptEvent> = serde_json::from_str(&script)
        .with_context(|| format!("error parsing {:?}", cli.script))?;

    check_size(cli.width, cli.height)?;

    let clock = Clock::with_time(Duration::ZERO);
    clock.apply_config(&config.animations);

    let size = Size::from((cli.width, cli.height));
    let mut drawer = DrawerController::new(size, clock.clone(), Options::from_config(&config));
    drawer.set_menu_page(DemoPage::new("Menu", StatusBarStyle::LightContent));
    drawer.set_pages(
        (1..=MENU_ROWS)
            .map(|i| DemoPage::new(format!("VC #{i}"), StatusBarStyle::Default))
            .collect(),
    );
    drawer.present(0, false);

    info!(
        "replaying {} events on drawer {}",
        events.len(),
        drawer.id().get()
    );
    for (idx, event) in events.into_iter().enumerate() {
        debug!("event {idx}: {event:?}");
        apply_event(&mut drawer, &clock, event)
            .with_context(|| format!("error applying event {idx}"))?;
        drawer.advance_animations();

        if cli.verbose {
            eprintln!("{}", serde_json::to_string(&drawer.snapshot())?);
        }
    }

    let snapshot = drawer.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    if let Some(page) = drawer.front_page() {
        info!("front page: {}", page.title);
    }

    Ok(())
}

fn check_size(width: f64, height: f64) -> Result<()> {
    if !(width.is_finite() && width >= 0. && height.is_finite() && height >= 0.) {
        bail!("invalid container size {width}×{height}");
    }
    Ok(())
}

fn apply_event(
    drawer: &mut DrawerController<DemoPage>,
    clock: &Clock,
    event: ScriptEvent,
) -> Result<()> {
    match event {
        ScriptEvent::DragBegin { source } => {
            drawer.drag_begin(source);
        }
        ScriptEvent::DragMove { source, dx, dy } => {
            drawer.drag_update(source, Point::from((dx, dy)));
        }
        ScriptEvent::DragEnd { source, dx, vx } => {
            drawer.drag_end(source, DragSample::new((dx, 0.), (vx, 0.)));
        }
        ScriptEvent::DragCancel { source } => {
            drawer.drag_cancel(source);
        }
        ScriptEvent::Tap => {
            drawer.dim_overlay_tap();
        }
        ScriptEvent::Toggle { open, animated } => drawer.toggle(open, animated),
        ScriptEvent::Present { page, animated } => {
            if page >= drawer.pages().len() {
                bail!("page {page} out of range");
            }
            drawer.present(page, animated);
        }
        ScriptEvent::SelectMenuRow { row } => {
            if row >= MENU_ROWS {
                bail!("menu row {row} out of range");
            }
            drawer.present(row, true);
        }
        ScriptEvent::Resize { width, height } => {
            check_size(width, height)?;
            drawer.resize_begin(Size::from((width, height)));
        }
        ScriptEvent::ResizeComplete => drawer.resize_complete(),
        ScriptEvent::Advance { ms } => clock.advance(Duration::from_millis(ms)),
    }

    Ok(())
}
