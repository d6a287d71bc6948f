use crate::data::filter::FilterSelection;
use crate::data::model::SalaryDataset;
use crate::data::summary::FilteredView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<SalaryDataset>,

    /// Current selector choices across the four filter dimensions.
    pub selection: FilterSelection,

    /// View derived from the current selection (cached per interaction).
    pub view: Option<FilteredView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            view: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.selection = FilterSelection::default();
        self.view = Some(FilteredView::compute(&dataset, &self.selection));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute the view after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.view = Some(FilteredView::compute(ds, &self.selection));
        }
    }

    /// Set every dimension back to "all".
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::default();
        self.refilter();
    }

    /// Rows currently visible in the data table.
    pub fn visible_count(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.summary.total_records)
    }
}
