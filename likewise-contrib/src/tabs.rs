//! Tab selection over one snapshot.

use serde::{Deserialize, Serialize};

use likewise_model::{Contribution, ContributionKind};

use crate::snapshot::ViewSnapshot;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// The four timeline tabs.
///
/// `All` is the initial selection; any tab may be selected from any
/// other. Selection is a flat choice, not a protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Code,
    Design,
    Research,
}

impl Tab {
    /// All tabs, in display order.
    pub const ALL_TABS: [Tab; 4] = [Tab::All, Tab::Code, Tab::Design, Tab::Research];

    /// The category this tab narrows to; `None` for the combined view.
    pub fn kind(&self) -> Option<ContributionKind> {
        match self {
            Tab::All => None,
            Tab::Code => Some(ContributionKind::Code),
            Tab::Design => Some(ContributionKind::Design),
            Tab::Research => Some(ContributionKind::Research),
        }
    }

    /// Trigger label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Code => "Code",
            Tab::Design => "Design",
            Tab::Research => "Research",
        }
    }

    /// Category-specific empty-state headline.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Tab::All => "No contributions yet",
            Tab::Code => "No code contributions yet",
            Tab::Design => "No design contributions yet",
            Tab::Research => "No research contributions yet",
        }
    }

    /// Empty-state call to action.
    pub fn empty_hint(&self) -> &'static str {
        match self {
            Tab::All => "Start contributing to this idea!",
            _ => "Be the first to contribute!",
        }
    }
}

/// What a tab renders from a snapshot.
///
/// `Empty` is an explicit signal distinct from the loading phase, so
/// the presentation can show the category-specific empty copy instead
/// of a blank area.
#[derive(Debug, Clone, PartialEq)]
pub enum TabPane<'a> {
    Entries(&'a [Contribution]),
    Empty(Tab),
}

/// Holds the user's tab selection, independent of the snapshot.
///
/// Selecting a tab performs no I/O and never re-runs the pipeline; it
/// only changes which derived subset is rendered.
#[derive(Debug, Clone, Default)]
pub struct TabView {
    selected: Tab,
}

impl TabView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Tab {
        self.selected
    }

    /// Flat transition: any tab to any tab.
    pub fn select(&mut self, tab: Tab) {
        self.selected = tab;
    }

    /// The subset the current selection renders.
    pub fn visible<'a>(&self, snapshot: &'a ViewSnapshot) -> &'a [Contribution] {
        match self.selected.kind() {
            None => &snapshot.contributions,
            Some(kind) => snapshot.partition.by_kind(kind),
        }
    }

    /// The pane for the current selection.
    pub fn pane<'a>(&self, snapshot: &'a ViewSnapshot) -> TabPane<'a> {
        let visible = self.visible(snapshot);
        if visible.is_empty() {
            TabPane::Empty(self.selected)
        } else {
            TabPane::Entries(visible)
        }
    }
}
