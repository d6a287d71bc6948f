use super::filter::{filtered_indices, FilterSelection};
use super::model::SalaryDataset;

// ---------------------------------------------------------------------------
// FilteredView – filtered subset plus everything derived from it
// ---------------------------------------------------------------------------

/// Scalar metrics shown in the dashboard header.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Arithmetic mean of the salary column; 0.0 on an empty view.
    pub average_salary: f64,
    /// Maximum of the salary column; 0.0 on an empty view.
    pub max_salary: f64,
    /// Row count of the view.
    pub total_records: usize,
    /// Mode of the role column, ties broken by first-encountered order;
    /// "N/A" on an empty view.
    pub top_role: String,
}

/// Pre-derived inputs for the four charts. Bucketing for the salary
/// histogram is left to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInputs {
    /// Top 10 roles by mean salary, descending.
    pub top_roles: Vec<(String, f64)>,
    /// Raw salary column of the view.
    pub salaries: Vec<f64>,
    /// Row count per remote-ratio category, in first-encountered order.
    pub remote_counts: Vec<(String, usize)>,
    /// Mean salary per country over the view's Data-Scientist rows.
    pub ds_salary_by_country: Vec<(String, f64)>,
}

/// The result of one filter interaction: matching row indices plus the
/// summaries and chart inputs derived from them. Recomputed from scratch
/// on every selection change and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    /// Indices into `SalaryDataset::records`, in source order.
    pub indices: Vec<usize>,
    pub summary: Summary,
    pub charts: ChartInputs,
}

const TOP_ROLES_LIMIT: usize = 10;
const DS_ROLE: &str = "Data Scientist";

impl FilteredView {
    /// Apply `selection` to `dataset` and derive all summaries.
    ///
    /// Pure and total: an empty subset is a defined degenerate state
    /// (zero metrics, "N/A" role, empty chart inputs), never an error.
    pub fn compute(dataset: &SalaryDataset, selection: &FilterSelection) -> Self {
        let indices = filtered_indices(dataset, selection);

        let salaries: Vec<f64> = indices
            .iter()
            .map(|&i| dataset.records[i].salary_usd)
            .collect();

        let summary = Summary {
            average_salary: mean(&salaries),
            max_salary: salaries.iter().cloned().fold(0.0, f64::max),
            total_records: indices.len(),
            top_role: most_common_role(dataset, &indices),
        };

        let charts = ChartInputs {
            top_roles: top_roles_by_mean_salary(dataset, &indices),
            salaries,
            remote_counts: counts_by(dataset, &indices, |rec| rec.remote_ratio.as_str()),
            ds_salary_by_country: data_scientist_salary_by_country(dataset, &indices),
        };

        FilteredView {
            indices,
            summary,
            charts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Mode of the role column. Groups are visited in first-encountered
/// order, and only a strictly larger count displaces the current best,
/// so ties resolve to the earliest role.
fn most_common_role(dataset: &SalaryDataset, indices: &[usize]) -> String {
    let counts = counts_by(dataset, indices, |rec| rec.role.as_str());
    counts
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .map(|(role, _)| role)
        .unwrap_or_else(|| "N/A".to_string())
}

/// Group rows of the view by `key` and count them, preserving the order
/// in which each group is first seen.
fn counts_by<'a, F>(dataset: &'a SalaryDataset, indices: &[usize], key: F) -> Vec<(String, usize)>
where
    F: Fn(&'a super::model::Record) -> &'a str,
{
    let mut groups: Vec<(String, usize)> = Vec::new();
    for &i in indices {
        let k = key(&dataset.records[i]);
        match groups.iter_mut().find(|(name, _)| name == k) {
            Some((_, n)) => *n += 1,
            None => groups.push((k.to_string(), 1)),
        }
    }
    groups
}

/// Group rows of the view by `key` and average their salaries, preserving
/// first-seen group order.
fn mean_salary_by<'a, F>(dataset: &'a SalaryDataset, indices: &[usize], key: F) -> Vec<(String, f64)>
where
    F: Fn(&'a super::model::Record) -> &'a str,
{
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    for &i in indices {
        let rec = &dataset.records[i];
        let k = key(rec);
        match groups.iter_mut().find(|(name, _, _)| name == k) {
            Some((_, sum, n)) => {
                *sum += rec.salary_usd;
                *n += 1;
            }
            None => groups.push((k.to_string(), rec.salary_usd, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(name, sum, n)| (name, sum / n as f64))
        .collect()
}

/// Top roles by mean salary, descending. The sort is stable, so roles
/// with equal means stay in first-encountered order.
fn top_roles_by_mean_salary(dataset: &SalaryDataset, indices: &[usize]) -> Vec<(String, f64)> {
    let mut roles = mean_salary_by(dataset, indices, |rec| rec.role.as_str());
    roles.sort_by(|a, b| b.1.total_cmp(&a.1));
    roles.truncate(TOP_ROLES_LIMIT);
    roles
}

fn data_scientist_salary_by_country(
    dataset: &SalaryDataset,
    indices: &[usize],
) -> Vec<(String, f64)> {
    let ds_indices: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].role == DS_ROLE)
        .collect();
    mean_salary_by(dataset, &ds_indices, |rec| rec.country.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(
        year: i32,
        role: &str,
        seniority: &str,
        contract: &str,
        size: &str,
        country: &str,
        salary: f64,
    ) -> Record {
        Record {
            year,
            role: role.into(),
            seniority: seniority.into(),
            contract: contract.into(),
            company_size: size.into(),
            remote_ratio: "Remote".into(),
            country: country.into(),
            salary_usd: salary,
        }
    }

    #[test]
    fn year_selection_scenario() {
        let ds = SalaryDataset::from_records(vec![
            rec(2023, "Data Scientist", "Senior", "Full-time", "Large", "USA", 150_000.0),
            rec(2023, "Data Analyst", "Junior", "Full-time", "Small", "DEU", 60_000.0),
        ]);
        let selection = FilterSelection {
            year: Some(2023),
            ..Default::default()
        };
        let view = FilteredView::compute(&ds, &selection);

        assert_eq!(view.indices, vec![0, 1]);
        assert_eq!(view.summary.average_salary, 105_000.0);
        assert_eq!(view.summary.max_salary, 150_000.0);
        assert_eq!(view.summary.total_records, 2);
        // Both roles appear once; the first-encountered one wins the tie.
        assert_eq!(view.summary.top_role, "Data Scientist");
    }

    #[test]
    fn empty_view_is_a_defined_degenerate_state() {
        let ds = SalaryDataset::from_records(vec![rec(
            2023,
            "Data Scientist",
            "Senior",
            "Full-time",
            "Large",
            "USA",
            150_000.0,
        )]);
        let selection = FilterSelection {
            seniority: Some("Executive".into()),
            ..Default::default()
        };
        let view = FilteredView::compute(&ds, &selection);

        assert!(view.is_empty());
        assert_eq!(view.summary.average_salary, 0.0);
        assert_eq!(view.summary.max_salary, 0.0);
        assert_eq!(view.summary.total_records, 0);
        assert_eq!(view.summary.top_role, "N/A");
        assert!(view.charts.top_roles.is_empty());
        assert!(view.charts.salaries.is_empty());
        assert!(view.charts.remote_counts.is_empty());
        assert!(view.charts.ds_salary_by_country.is_empty());
    }

    #[test]
    fn top_roles_sorted_descending_and_capped_at_ten() {
        let mut records = Vec::new();
        for (i, salary) in (0..14).map(|i| (i, 40_000.0 + 5_000.0 * i as f64)) {
            records.push(rec(
                2024,
                &format!("Role {i}"),
                "Senior",
                "Full-time",
                "Large",
                "USA",
                salary,
            ));
        }
        let ds = SalaryDataset::from_records(records);
        let view = FilteredView::compute(&ds, &FilterSelection::default());

        let top = &view.charts.top_roles;
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top[0].0, "Role 13");
    }

    #[test]
    fn top_roles_ties_keep_first_encountered_order() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "Data Analyst", "Junior", "Full-time", "Small", "DEU", 90_000.0),
            rec(2024, "ML Engineer", "Junior", "Full-time", "Small", "DEU", 90_000.0),
        ]);
        let view = FilteredView::compute(&ds, &FilterSelection::default());
        let names: Vec<&str> = view.charts.top_roles.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Data Analyst", "ML Engineer"]);
    }

    #[test]
    fn most_common_role_prefers_strictly_higher_count() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "Data Analyst", "Junior", "Full-time", "Small", "DEU", 60_000.0),
            rec(2024, "Data Scientist", "Senior", "Full-time", "Large", "USA", 150_000.0),
            rec(2024, "Data Scientist", "Senior", "Full-time", "Large", "GBR", 140_000.0),
        ]);
        let view = FilteredView::compute(&ds, &FilterSelection::default());
        assert_eq!(view.summary.top_role, "Data Scientist");
    }

    #[test]
    fn country_chart_only_counts_data_scientists() {
        let ds = SalaryDataset::from_records(vec![
            rec(2024, "Data Scientist", "Senior", "Full-time", "Large", "USA", 160_000.0),
            rec(2024, "Data Scientist", "Junior", "Full-time", "Large", "USA", 120_000.0),
            rec(2024, "Data Scientist", "Senior", "Full-time", "Large", "GBR", 130_000.0),
            rec(2024, "Data Analyst", "Senior", "Full-time", "Large", "USA", 90_000.0),
        ]);
        let view = FilteredView::compute(&ds, &FilterSelection::default());
        assert_eq!(
            view.charts.ds_salary_by_country,
            vec![("USA".to_string(), 140_000.0), ("GBR".to_string(), 130_000.0)]
        );
    }

    #[test]
    fn remote_counts_group_in_first_seen_order() {
        let mut a = rec(2024, "Data Scientist", "Senior", "Full-time", "Large", "USA", 150_000.0);
        a.remote_ratio = "Hybrid".into();
        let b = rec(2024, "Data Analyst", "Junior", "Full-time", "Small", "DEU", 60_000.0);
        let mut c = rec(2024, "Data Engineer", "Senior", "Full-time", "Large", "GBR", 120_000.0);
        c.remote_ratio = "Hybrid".into();

        let ds = SalaryDataset::from_records(vec![a, b, c]);
        let view = FilteredView::compute(&ds, &FilterSelection::default());
        assert_eq!(
            view.charts.remote_counts,
            vec![("Hybrid".to_string(), 2), ("Remote".to_string(), 1)]
        );
    }
}
