use contracts::domain::a001_sale_entry::aggregate::SaleEntry;
use leptos::prelude::*;

/// Main view tabs
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    DailyLedger,
    LastSale,
    Summary,
}

/// App-wide UI state shared through context: active tab, the entry
/// form modal and a version counter the data views re-fetch on.
#[derive(Clone, Copy)]
pub struct UiContext {
    pub active_tab: RwSignal<ActiveTab>,
    pub entry_form_open: RwSignal<bool>,
    pub editing_entry: RwSignal<Option<SaleEntry>>,
    data_version: RwSignal<u32>,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            active_tab: RwSignal::new(ActiveTab::DailyLedger),
            entry_form_open: RwSignal::new(false),
            editing_entry: RwSignal::new(None),
            data_version: RwSignal::new(0),
        }
    }

    /// Open the entry form for a new record
    pub fn open_new_entry(&self) {
        self.editing_entry.set(None);
        self.entry_form_open.set(true);
    }

    /// Open the entry form prefilled with an existing record
    pub fn open_edit_entry(&self, entry: SaleEntry) {
        self.editing_entry.set(Some(entry));
        self.entry_form_open.set(true);
    }

    pub fn close_entry_form(&self) {
        self.entry_form_open.set(false);
        self.editing_entry.set(None);
    }

    /// Signal data views subscribe to for reloads
    pub fn data_version(&self) -> RwSignal<u32> {
        self.data_version
    }

    /// Bump after any mutation so open views re-fetch
    pub fn notify_data_changed(&self) {
        self.data_version.update(|v| *v += 1);
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_ui() -> UiContext {
    use_context::<UiContext>().expect("UiContext not found in component tree")
}
