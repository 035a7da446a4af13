// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted sessions for every vizflow view.
//!
//! Each section activates a view, feeds it ticks and pointer input the way a host would, and
//! records SVG snapshots of the diff-driven surface. Set `RUST_LOG=vizflow_interact=debug` to
//! watch the controller's phase changes.

mod data;
mod html;
mod svg;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use kurbo::{Point, Rect, Size, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vizflow_core::{MarkDiff, Scene, stable_key};
use vizflow_interact::views::{BarView, BubbleView, FlowMapView, GraphView, ScatterView};
use vizflow_interact::{ControllerConfig, InteractionController, PointerEvent, View};

#[derive(Parser, Debug)]
#[command(name = "vizflow_demo", version, about = "Writes an HTML report of vizflow sessions")]
struct Cli {
    /// Output HTML path.
    #[arg(long, default_value = "vizflow_demo.html")]
    out: PathBuf,

    /// Container width in pixels.
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    /// Length of the bubble chart sweep in milliseconds.
    #[arg(long, default_value_t = 5000)]
    duration_ms: u64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of sweep snapshots in the report.
    #[arg(long, default_value_t = 4)]
    snapshots: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.fps > 0, "--fps must be positive");
    anyhow::ensure!(
        cli.width.is_finite() && cli.width >= 200.0,
        "--width must be at least 200"
    );

    let sections = vec![
        bubble_section(&cli)?,
        map_section(&cli)?,
        bar_section(&cli)?,
        scatter_section(&cli)?,
        graph_section(&cli)?,
    ];

    let report = html::render_report("vizflow demo", &sections);
    if let Some(parent) = cli.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&cli.out, report)
        .with_context(|| format!("write report '{}'", cli.out.display()))?;
    info!(path = %cli.out.display(), sections = sections.len(), "report written");
    Ok(())
}

/// A controller wired to an SVG surface that only sees diffs.
struct Session<V> {
    controller: InteractionController<V>,
    surface: svg::SvgSurface,
}

impl<V: View> Session<V> {
    fn start(view: V, config: ControllerConfig, view_box: Rect) -> anyhow::Result<Self> {
        let mut controller = InteractionController::new(view, config)?;
        let mut surface = svg::SvgSurface::new(view_box);
        surface.apply(&controller.activate()?);
        Ok(Self {
            controller,
            surface,
        })
    }

    fn apply(&mut self, diffs: Vec<MarkDiff>) -> anyhow::Result<usize> {
        self.surface.apply(&diffs);
        anyhow::ensure!(
            self.surface.len() == self.controller.scene().len(),
            "surface out of sync: {} painted, {} retained",
            self.surface.len(),
            self.controller.scene().len()
        );
        Ok(diffs.len())
    }

    fn tick(&mut self, dt: Duration) -> anyhow::Result<usize> {
        let diffs = self.controller.tick(dt)?;
        self.apply(diffs)
    }

    fn handle(&mut self, event: PointerEvent) -> anyhow::Result<usize> {
        let diffs = self.controller.handle(event)?;
        self.apply(diffs)
    }

    /// Moves the pointer onto the element bound to `key`, if it is on screen.
    fn hover(&mut self, key: u64) -> anyhow::Result<bool> {
        let Some(at) = anchor_for_datum(self.controller.scene(), key) else {
            return Ok(false);
        };
        self.handle(PointerEvent::Move(at))?;
        Ok(true)
    }

    fn svg(&self) -> String {
        self.surface.to_svg_string()
    }
}

fn anchor_for_datum(scene: &Scene, key: u64) -> Option<Point> {
    scene
        .iter_painted()
        .find(|(id, _, _)| scene.datum(*id) == Some(key))
        .map(|(_, _, payload)| payload.anchor())
}

fn bubble_section(cli: &Cli) -> anyhow::Result<html::HtmlSection> {
    let view = BubbleView::new(data::nations()?, data::BUBBLE_ATTRS, cli.width)?;
    let size = view.size();
    let config = ControllerConfig::new().with_duration(Duration::from_millis(cli.duration_ms));
    let mut session = Session::start(view, config, Rect::from_origin_size(Point::ZERO, size))?;
    let mut section = html::HtmlSection::new(
        "Bubble chart",
        "Internet adoption against GDP per capita, sized by population. Countries appear only \
         in years they reported all three values.",
    );
    section.push("1990 (start of the sweep)", session.svg());

    let dt = Duration::from_secs_f64(1.0 / f64::from(cli.fps));
    let frames = (cli.duration_ms * u64::from(cli.fps)).div_ceil(1000);
    let every = (frames / u64::from(cli.snapshots.max(1))).max(1);
    let mut frame = 0_u64;
    let mut diffs = 0;
    while session.controller.is_animating() {
        diffs += session.tick(dt)?;
        frame += 1;
        if frame % every == 0 || !session.controller.is_animating() {
            let t = session.controller.state().time().unwrap_or_default();
            section.push(format!("frame {frame}, year {t}"), session.svg());
        }
    }
    info!(frames = frame, diffs, "bubble sweep finished");

    let region = session
        .controller
        .scrub_region()
        .cloned()
        .context("bubble chart has no scrub region")?;
    let (t0, t1) = region.extent();
    let inner = region.rect().inflate(-region.inset(), 0.0);
    let x_for = |year: f64| inner.x0 + (year - t0) / (t1 - t0) * inner.width();
    let y = region.rect().center().y;

    session.handle(PointerEvent::Move(Point::new(x_for(2001.0), y)))?;
    section.push("scrubbed to 2001: nobody reported everything", session.svg());
    session.handle(PointerEvent::Move(Point::new(x_for(2000.0), y)))?;
    section.push("scrubbed to 2000", session.svg());

    if session.hover(stable_key("Freedonia"))? {
        section.push("hovering Freedonia", session.svg());
    }
    session.handle(PointerEvent::Leave)?;
    Ok(section)
}

fn map_section(cli: &Cli) -> anyhow::Result<html::HtmlSection> {
    let (features, relations, endpoints) = data::remittances();
    let view = FlowMapView::new(cli.width, features, relations, endpoints);
    let size = view.size();
    let mut session = Session::start(
        view,
        ControllerConfig::new(),
        Rect::from_origin_size(Point::ZERO, size),
    )?;
    let mut section = html::HtmlSection::new(
        "Flow map",
        "Remittances: hover a country to draw the flows it sends or receives. Wheel zooms and \
         dragging pans the whole map.",
    );
    section.push("idle", session.svg());

    let center = Point::new(size.width / 2.0, size.height / 2.0);
    session.handle(PointerEvent::Wheel {
        pos: center,
        delta: -350.0,
    })?;
    session.handle(PointerEvent::Drag {
        delta: Vec2::new(120.0, 40.0),
    })?;
    section.push("zoomed and panned", session.svg());

    if session.hover(stable_key("USA"))? {
        section.push("hovering USA", session.svg());
    }
    if session.hover(stable_key("IND"))? {
        section.push("hovering IND", session.svg());
    }
    session.handle(PointerEvent::Leave)?;
    Ok(section)
}

fn bar_section(cli: &Cli) -> anyhow::Result<html::HtmlSection> {
    let width = cli.width.min(600.0);
    let view = BarView::new(width, data::vote_shares());
    let height = view.height();
    let mut session = Session::start(
        view,
        ControllerConfig::new(),
        Rect::new(0.0, 0.0, width, height + 40.0),
    )?;
    let mut section = html::HtmlSection::new("Bar chart", "Share of first-place votes.");
    section.push("idle", session.svg());
    if session.hover(stable_key("Ronaldo"))? {
        section.push("hovering Ronaldo", session.svg());
    }
    Ok(section)
}

fn scatter_section(cli: &Cli) -> anyhow::Result<html::HtmlSection> {
    let width = cli.width.min(600.0);
    let view = ScatterView::new(width, data::salaries());
    let mut session = Session::start(
        view,
        ControllerConfig::new(),
        Rect::new(0.0, 0.0, width, width / 2.0),
    )?;
    let mut section = html::HtmlSection::new("Scatterplot", "Salary against goals scored.");
    section.push("idle", session.svg());
    if session.hover(stable_key("LM"))? {
        section.push("hovering LM", session.svg());
    }
    Ok(section)
}

fn graph_section(cli: &Cli) -> anyhow::Result<html::HtmlSection> {
    let size = Size::new(cli.width.min(600.0), 400.0);
    let view = GraphView::new(size, data::votes_graph());
    let mut session = Session::start(
        view,
        ControllerConfig::new(),
        Rect::from_origin_size(Point::ZERO, size),
    )?;
    let mut section = html::HtmlSection::new(
        "Vote graph",
        "Who voted for whom. Hover a player to see their ballot; players without one show no \
         popup.",
    );
    section.push("idle", session.svg());
    if session.hover(stable_key("messi"))? {
        section.push("hovering Messi", session.svg());
    }
    if session.hover(stable_key("iniesta"))? {
        section.push("hovering Iniesta (no ballot)", session.svg());
    }
    Ok(section)
}
