//! All possible UI actions. Actions are the sole mechanism for state mutation.

use umistat_api::StatsSnapshot;

/// Every state transition in the widget is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Stats fetch ────────────────────────────────────────────────
    /// The two-step fetch completed; counters from the response.
    StatsLoaded(StatsSnapshot),
    /// The fetch failed (or was never started); loading ends with no
    /// counters set.
    StatsFailed,
}
