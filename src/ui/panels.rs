use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter selectors
// ---------------------------------------------------------------------------

/// Render the left filter panel: one selector per filter dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the option lists so the selectors can mutate the selection.
    let years = dataset.years.clone();
    let seniorities = dataset.seniorities.clone();
    let contracts = dataset.contracts.clone();
    let company_sizes = dataset.company_sizes.clone();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= year_combo(ui, &years, &mut state.selection.year);
            changed |= category_combo(
                ui,
                "Seniority",
                &seniorities,
                &mut state.selection.seniority,
            );
            changed |= category_combo(
                ui,
                "Contract type",
                &contracts,
                &mut state.selection.contract,
            );
            changed |= category_combo(
                ui,
                "Company size",
                &company_sizes,
                &mut state.selection.company_size,
            );

            ui.add_space(8.0);
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    if changed {
        state.refilter();
    }
}

fn year_combo(ui: &mut Ui, years: &[i32], selected: &mut Option<i32>) -> bool {
    let mut changed = false;
    ui.strong("Year");
    let current = selected.map_or_else(|| "All".to_string(), |y| y.to_string());
    egui::ComboBox::from_id_salt("filter_year")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), "All").clicked() {
                changed |= selected.take().is_some();
            }
            for &year in years {
                if ui
                    .selectable_label(*selected == Some(year), year.to_string())
                    .clicked()
                {
                    changed |= *selected != Some(year);
                    *selected = Some(year);
                }
            }
        });
    ui.add_space(6.0);
    changed
}

fn category_combo(
    ui: &mut Ui,
    label: &str,
    options: &[String],
    selected: &mut Option<String>,
) -> bool {
    let mut changed = false;
    ui.strong(label);
    let current = selected.clone().unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt(label)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), "All").clicked() {
                changed |= selected.take().is_some();
            }
            for option in options {
                if ui
                    .selectable_label(selected.as_deref() == Some(option), option)
                    .clicked()
                {
                    changed |= selected.as_deref() != Some(option);
                    *selected = Some(option.clone());
                }
            }
        });
    ui.add_space(6.0);
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} matching",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} salary records spanning years {:?}",
                    dataset.len(),
                    dataset.years
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}
