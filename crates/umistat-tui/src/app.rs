//! Application core — event loop and action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::info;

use umistat_config::Config;

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::stats_line::StatsWidget;

/// Top-level application state and event loop.
pub struct App {
    /// Whether the app should keep running.
    running: bool,
    /// The single stats widget.
    widget: Box<dyn Component>,
    /// Widget configuration (endpoint, share id, window parameters).
    config: Config,
    /// Action sender — components and background tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            running: true,
            widget: Box::new(StatsWidget::new()),
            config,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.widget.init(self.action_tx.clone())?;

        // The fetch runs exactly once per mount -- nothing re-fires it.
        crate::fetch::spawn_stats_fetch(&self.config, self.action_tx.clone());

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Only global keys exist; the widget
    /// itself takes no input.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q') | KeyCode::Esc) => Ok(Some(Action::Quit)),
            _ => self.widget.handle_key_event(key),
        }
    }

    /// Process a single action — update app state and propagate to the widget.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render | Action::Resize(..) => {}

            other => {
                if let Some(follow_up) = self.widget.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    /// Render the full application frame: the widget centered in the
    /// content area, key hints at the bottom.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content = layout[0];
        let width = 60u16.min(content.width);
        let height = 3u16.min(content.height);
        let x = (content.width.saturating_sub(width)) / 2;
        let y = (content.height.saturating_sub(height)) / 2;
        let widget_area = Rect::new(content.x + x, content.y + y, width, height);

        self.widget.render(frame, widget_area);

        self.render_status_bar(frame, layout[1]);
    }

    #[allow(clippy::unused_self)]
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
