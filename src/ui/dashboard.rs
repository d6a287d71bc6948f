use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::model::SalaryDataset;
use crate::data::summary::FilteredView;
use crate::state::AppState;

const HISTOGRAM_BINS: usize = 30;
const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Central panel – metrics, charts, data table
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (dataset, view) = match (&state.dataset, &state.view) {
        (Some(ds), Some(view)) => (ds, view),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a salary dataset to explore  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Salary analysis");
            ui.label("Annual salaries in USD. Use the filters on the left to refine the view.");
            ui.add_space(6.0);

            metrics_row(ui, view);
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                top_roles_chart(&mut cols[0], view);
                salary_histogram(&mut cols[1], view);
            });
            ui.columns(2, |cols: &mut [Ui]| {
                work_type_chart(&mut cols[0], view);
                country_chart(&mut cols[1], view);
            });

            ui.separator();
            ui.heading("Detailed data");
            data_table(ui, dataset, view);
        });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, view: &FilteredView) {
    let summary = &view.summary;
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Average salary", format_usd(summary.average_salary));
        metric_card(&mut cols[1], "Maximum salary", format_usd(summary.max_salary));
        metric_card(
            &mut cols[2],
            "Total records",
            group_thousands(summary.total_records as i64),
        );
        metric_card(&mut cols[3], "Most frequent role", summary.top_role.clone());
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.heading(value);
        });
    });
}

/// Format a USD amount with thousands separators, e.g. `$105,000`.
fn format_usd(amount: f64) -> String {
    format!("${}", group_thousands(amount.round() as i64))
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn chart_placeholder(ui: &mut Ui, title: &str) {
    ui.strong(title);
    ui.add_space(4.0);
    ui.label("No data available for the current filters.");
}

/// Horizontal bar chart of the top roles by mean salary, highest on top.
fn top_roles_chart(ui: &mut Ui, view: &FilteredView) {
    if view.is_empty() {
        chart_placeholder(ui, "Top 10 roles by average salary");
        return;
    }

    let roles = &view.charts.top_roles;
    let n = roles.len();
    // Position 1 is the bottom row, so reverse so the highest mean lands on top.
    let labels: Vec<String> = roles.iter().rev().map(|(name, _)| name.clone()).collect();
    let bars: Vec<Bar> = roles
        .iter()
        .enumerate()
        .map(|(i, (name, mean))| Bar::new((n - i) as f64, *mean).name(name.clone()))
        .collect();
    let chart = BarChart::new(bars).horizontal();

    ui.strong("Top 10 roles by average salary");
    Plot::new("top_roles_chart")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 0.05 {
                return String::new();
            }
            let pos = pos as usize;
            if (1..=labels.len()).contains(&pos) {
                labels[pos - 1].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Histogram of the filtered salary column, bucketed here in the UI layer.
fn salary_histogram(ui: &mut Ui, view: &FilteredView) {
    if view.is_empty() {
        chart_placeholder(ui, "Annual salary distribution");
        return;
    }

    let salaries = &view.charts.salaries;
    let min = salaries.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = salaries.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = ((max - min) / HISTOGRAM_BINS as f64).max(1.0);

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for &s in salaries {
        let bin = (((s - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(bin, &count)| {
            let center = min + (bin as f64 + 0.5) * width;
            Bar::new(center, count as f64)
                .width(width * 0.95)
                .name(format!("{} – {}", format_usd(center - width / 2.0), format_usd(center + width / 2.0)))
        })
        .collect();

    ui.strong("Annual salary distribution");
    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Per-remote-category proportions, one coloured bar per category.
fn work_type_chart(ui: &mut Ui, view: &FilteredView) {
    if view.is_empty() {
        chart_placeholder(ui, "Proportion of work types");
        return;
    }

    let counts = &view.charts.remote_counts;
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let colors = ColorMap::new(counts.iter().map(|(name, _)| name.as_str()));

    ui.strong("Proportion of work types");
    Plot::new("work_type_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (name, count)) in counts.iter().enumerate() {
                let pct = 100.0 * *count as f64 / total.max(1) as f64;
                let bar = Bar::new((i + 1) as f64, *count as f64).name(name.clone());
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .color(colors.color_for(name))
                        .name(format!("{name} ({pct:.0}%)")),
                );
            }
        });
}

/// Mean Data-Scientist salary per residence country (horizontal bars).
fn country_chart(ui: &mut Ui, view: &FilteredView) {
    let countries = &view.charts.ds_salary_by_country;
    if countries.is_empty() {
        chart_placeholder(ui, "Average Data Scientist salary by country");
        return;
    }

    let n = countries.len();
    let labels: Vec<String> = countries.iter().rev().map(|(name, _)| name.clone()).collect();
    let bars: Vec<Bar> = countries
        .iter()
        .enumerate()
        .map(|(i, (name, mean))| Bar::new((n - i) as f64, *mean).name(name.clone()))
        .collect();

    ui.strong("Average Data Scientist salary by country");
    Plot::new("country_chart")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 0.05 {
                return String::new();
            }
            let pos = pos as usize;
            if (1..=labels.len()).contains(&pos) {
                labels[pos - 1].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

const TABLE_HEADERS: [&str; 8] = [
    "Year",
    "Role",
    "Seniority",
    "Contract",
    "Company size",
    "Remote",
    "Country",
    "Salary (USD)",
];

fn data_table(ui: &mut Ui, dataset: &SalaryDataset, view: &FilteredView) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), TABLE_HEADERS.len())
        .min_scrolled_height(200.0)
        .header(20.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.indices.len(), |mut row| {
                let rec = &dataset.records[view.indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.role);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.seniority);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.contract);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.company_size);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.remote_ratio);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.country);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd(rec.salary_usd));
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(105_000), "105,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-60_000), "-60,000");
    }

    #[test]
    fn usd_formatting_rounds_to_whole_dollars() {
        assert_eq!(format_usd(105_000.4), "$105,000");
        assert_eq!(format_usd(0.0), "$0");
    }
}
