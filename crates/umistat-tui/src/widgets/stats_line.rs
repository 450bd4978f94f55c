//! Visitor-counter widget — three labeled counters from the share API.
//!
//! Display state has exactly three phases: *loading* (every cell shows
//! `加载中...`), *loaded* (cells show their counter values), and *failed*
//! (loading cleared with no values, cells show `-`). Transitions happen
//! only through [`Component::update`].

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use umistat_api::StatsSnapshot;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

// Leading full-width spaces keep the two-character labels aligned with
// the four-character one.
const VIEWS_LABEL: &str = "　浏览量";
const VISITS_LABEL: &str = "访问次数";
const VISITORS_LABEL: &str = "　访客";

const LOADING_TEXT: &str = "加载中...";
const PLACEHOLDER: &str = "-";

/// The visitor-counter widget.
pub struct StatsWidget {
    loading: bool,
    snapshot: StatsSnapshot,
}

impl StatsWidget {
    pub fn new() -> Self {
        Self {
            loading: true,
            snapshot: StatsSnapshot::default(),
        }
    }

    fn counter_text(&self, value: Option<u64>) -> String {
        if self.loading {
            LOADING_TEXT.to_owned()
        } else {
            value.map_or_else(|| PLACEHOLDER.to_owned(), |v| v.to_string())
        }
    }

    /// The three `{label}：{content}` cells in display order.
    pub fn counter_cells(&self) -> [String; 3] {
        [
            format!("{VIEWS_LABEL}：{}", self.counter_text(self.snapshot.pageviews)),
            format!("{VISITS_LABEL}：{}", self.counter_text(self.snapshot.visits)),
            format!(
                "{VISITORS_LABEL}：{}",
                self.counter_text(self.snapshot.visitors)
            ),
        ]
    }
}

impl Component for StatsWidget {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatsLoaded(snapshot) => {
                self.snapshot = *snapshot;
                self.loading = false;
            }
            Action::StatsFailed => {
                self.loading = false;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" 访问统计 ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cells = self.counter_cells();
        let mut spans = vec![Span::raw(" ")];
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(cell.clone(), theme::counter_style()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn id(&self) -> &'static str {
        "Stats"
    }
}
