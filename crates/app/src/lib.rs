//! Demo host for the `pillbar` progress bars.
//!
//! Owns the Iced application loop and plays the host role for two bars
//! (Tick and Line):
//! - lays them out and attaches/detaches them
//! - forwards their `Invalidate` posts as redraw messages
//! - wires a slider, a "Progress" tween button and a "Reset" button to each
//! - rebuilds both bars when the style file changes on disk

pub mod tween;

use futures::channel::mpsc::Sender;
use iced::{
    widget::{button, column, container, image, row, slider, text, Space},
    Alignment, Element, Length, Subscription, Task,
};
use pillbar_config::{default_path, load as load_config, ConfigWatcher, PillConfig};
use pillbar_core::{Invalidate, Widget};
use pillbar_renderer::unpremultiplied_rgba;
use pillbar_theme::{Color, ProgressStyle};
use pillbar_widgets::ProgressBar;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tween::ProgressTween;

/// Target of the "Progress" button.
const TWEEN_TARGET: f32 = 0.6;
const TWEEN_DURATION: Duration = Duration::from_secs(1);
/// Pause between the end of a tween and the Tick bar's blink.
const BLINK_DELAY: Duration = Duration::from_millis(200);
/// Progress both bars start at.
const INITIAL_PROGRESS: f32 = 0.8;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the demo window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    let config = load_config(default_path()).unwrap_or_default();
    let width = config.window.width as f32 + 64.0;

    iced::application(Demo::new, Demo::update, Demo::view)
        .title(Demo::title)
        .subscription(Demo::subscription)
        .style(Demo::style)
        .window_size(iced::Size::new(width, 360.0))
        .run()
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Which of the two demo bars a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarId {
    Tick,
    Line,
}

impl BarId {
    fn key(self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Line => "line",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The redraw queue is up; carries the sender bars post into.
    HostReady(mpsc::Sender<Invalidate>),
    /// A bar asked to be redrawn.
    Redraw(Invalidate),
    /// Slider moved (0 – 100).
    SliderChanged(BarId, f32),
    /// "Progress" button: tween to 60 %.
    Animate(BarId),
    /// "Reset" button.
    Reset(BarId),
    /// Delayed blink of the Tick bar after a tween.
    Blink,
    /// Style file changed on disk.
    ConfigReloaded,
}

// ── State ─────────────────────────────────────────────────────────────────────

/// One bar plus the demo controls around it.
struct Panel {
    id:     BarId,
    bar:    ProgressBar,
    slider: f32,
    label:  String,
    tween:  Option<ProgressTween>,
    frame:  Option<image::Handle>,
}

impl Panel {
    fn new(id: BarId, style: ProgressStyle, config: &PillConfig) -> Self {
        let mut bar = ProgressBar::new(id.key(), style);
        bar.set_size(config.window.width as f32, config.window.height as f32);

        let mut panel = Self {
            id,
            bar,
            slider: 0.0,
            label: String::new(),
            tween: None,
            frame: None,
        };
        panel.show_progress(INITIAL_PROGRESS);
        panel.slider = INITIAL_PROGRESS * 100.0;
        panel.refresh();
        panel
    }

    fn show_progress(&mut self, fraction: f32) {
        self.bar.set_progress(fraction);
        self.label = format_percent(fraction);
    }

    /// Re-rasterise the bar into an image handle.
    fn refresh(&mut self) {
        self.frame = self.bar.rasterize().map(|pixmap| {
            image::Handle::from_rgba(pixmap.width(), pixmap.height(), unpremultiplied_rgba(&pixmap))
        });
    }

    /// Advance the tween; returns `true` the frame it finishes.
    fn step_tween(&mut self, now: Instant) -> bool {
        let Some(tween) = self.tween else { return false };
        let (value, done) = tween.sample(now);
        self.show_progress(value);
        if done {
            self.tween = None;
        }
        done
    }

    fn view(&self) -> Element<'_, Message> {
        let id = self.id;
        let title = match id {
            BarId::Tick => "Tick",
            BarId::Line => "Line",
        };

        let bar: Element<'_, Message> = match &self.frame {
            Some(handle) => image(handle.clone()).into(),
            None => Space::new().into(),
        };

        let controls = row![
            slider(0.0..=100.0, self.slider, move |v| Message::SliderChanged(id, v)),
            text(&self.label).size(14).width(Length::Fixed(48.0)),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let buttons = row![
            button(text("Progress")).on_press(Message::Animate(id)),
            button(text("Reset")).on_press(Message::Reset(id)),
        ]
        .spacing(8);

        column![
            text(title).size(13).color(Color::GRAY.to_iced()),
            bar,
            controls,
            buttons,
        ]
        .spacing(8)
        .into()
    }
}

struct Demo {
    tick: Panel,
    line: Panel,
    host: Option<mpsc::Sender<Invalidate>>,
}

impl Demo {
    fn new() -> Self {
        let config = load_config(default_path()).unwrap_or_else(|e| {
            warn!("{e}; using defaults");
            PillConfig::default()
        });
        let (tick, line) = build_panels(&config);
        Self { tick, line, host: None }
    }

    fn title(&self) -> String {
        String::from("pillbar")
    }

    fn panel_mut(&mut self, id: BarId) -> &mut Panel {
        match id {
            BarId::Tick => &mut self.tick,
            BarId::Line => &mut self.line,
        }
    }

    fn attach_all(&mut self) {
        if let Some(tx) = &self.host {
            self.tick.bar.attach(tx.clone());
            self.line.bar.attach(tx.clone());
        }
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::HostReady(tx) => {
                self.host = Some(tx);
                self.attach_all();
            }
            Message::Redraw(invalidate) => return self.redraw(&invalidate.widget),
            Message::SliderChanged(id, value) => {
                let panel = self.panel_mut(id);
                panel.slider = value;
                panel.show_progress(value / 100.0);
            }
            Message::Animate(id) => {
                let panel = self.panel_mut(id);
                panel.tween = Some(ProgressTween::new(
                    Instant::now(),
                    0.0,
                    TWEEN_TARGET,
                    TWEEN_DURATION,
                ));
            }
            Message::Reset(id) => {
                let panel = self.panel_mut(id);
                panel.tween = None;
                panel.slider = 0.0;
                panel.bar.reset();
                panel.label = format_percent(0.0);
            }
            Message::Blink => self.tick.bar.blink(Instant::now()),
            Message::ConfigReloaded => match load_config(default_path()) {
                Ok(config) => {
                    info!("Style reloaded; rebuilding bars");
                    let (tick, line) = build_panels(&config);
                    // Dropping the old panels detaches their bars.
                    self.tick = tick;
                    self.line = line;
                    self.attach_all();
                }
                Err(e) => warn!("Style reload failed: {e}"),
            },
        }
        Task::none()
    }

    fn redraw(&mut self, widget: &str) -> Task<Message> {
        let now = Instant::now();
        let panel = if widget == self.tick.bar.id() {
            &mut self.tick
        } else if widget == self.line.bar.id() {
            &mut self.line
        } else {
            return Task::none();
        };

        let finished = panel.step_tween(now);
        if finished {
            panel.slider = panel.bar.fraction() * 100.0;
        }
        if panel.bar.on_frame(now) {
            panel.refresh();
        }

        if finished {
            Task::perform(tokio::time::sleep(BLINK_DELAY), |_| Message::Blink)
        } else {
            Task::none()
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        container(column![self.tick.view(), self.line.view()].spacing(32))
            .padding(32)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            Subscription::run(host_stream),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: Color::from_hex("#1e1e2e").unwrap_or(Color::BLACK).to_iced(),
            text_color: Color::WHITE.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────
//
// Each free function doubles as the identity key for `Subscription::run`.

/// The host's redraw queue: hands its sender to the app once, then forwards
/// every `Invalidate` the bars post.
fn host_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(16, |mut sender: Sender<Message>| async move {
        let (tx, mut rx) = mpsc::channel::<Invalidate>(16);
        let _ = sender.try_send(Message::HostReady(tx));

        while let Some(invalidate) = rx.recv().await {
            let _ = sender.try_send(Message::Redraw(invalidate));
        }

        // Every sender dropped: only happens on shutdown.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

/// Watches the style file and sends `ConfigReloaded` on every write.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_panels(config: &PillConfig) -> (Panel, Panel) {
    (
        Panel::new(BarId::Tick, ProgressStyle::from_config(&config.tick), config),
        Panel::new(BarId::Line, ProgressStyle::from_config(&config.line), config),
    )
}

/// `0.553` → `"55%"`.
fn format_percent(fraction: f32) -> String {
    format!("{:.0}%", fraction * 100.0)
}
