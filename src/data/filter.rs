use super::model::SalaryDataset;

// ---------------------------------------------------------------------------
// Filter selection: one chosen value (or "all") per dimension
// ---------------------------------------------------------------------------

/// The user's current choice for each of the four filter dimensions.
/// `None` is the sentinel "all": do not filter on that dimension.
///
/// Recreated by the UI on every interaction; it carries no identity
/// beyond the current render cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub year: Option<i32>,
    pub seniority: Option<String>,
    pub contract: Option<String>,
    pub company_size: Option<String>,
}

impl FilterSelection {
    /// Whether every dimension is set to "all".
    pub fn is_unfiltered(&self) -> bool {
        self.year.is_none()
            && self.seniority.is_none()
            && self.contract.is_none()
            && self.company_size.is_none()
    }
}

/// Return indices of records that pass all active filters.
///
/// Dimensions combine with logical AND; a `None` dimension imposes no
/// constraint. With the all-"all" selection this returns every index,
/// so the view equals the full dataset row-for-row.
pub fn filtered_indices(dataset: &SalaryDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if let Some(year) = selection.year {
                if rec.year != year {
                    return false;
                }
            }
            if let Some(seniority) = &selection.seniority {
                if rec.seniority != *seniority {
                    return false;
                }
            }
            if let Some(contract) = &selection.contract {
                if rec.contract != *contract {
                    return false;
                }
            }
            if let Some(size) = &selection.company_size {
                if rec.company_size != *size {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn sample_dataset() -> SalaryDataset {
        let rows = [
            (2023, "Data Scientist", "Senior", "Full-time", "Large", "USA", 150_000.0),
            (2023, "Data Analyst", "Junior", "Full-time", "Small", "DEU", 60_000.0),
            (2022, "Data Engineer", "Senior", "Contract", "Medium", "GBR", 120_000.0),
        ];
        let records = rows
            .iter()
            .map(|&(year, role, seniority, contract, size, country, salary)| Record {
                year,
                role: role.into(),
                seniority: seniority.into(),
                contract: contract.into(),
                company_size: size.into(),
                remote_ratio: "Remote".into(),
                country: country.into(),
                salary_usd: salary,
            })
            .collect();
        SalaryDataset::from_records(records)
    }

    #[test]
    fn all_sentinel_selection_returns_every_row() {
        let ds = sample_dataset();
        let selection = FilterSelection::default();
        assert!(selection.is_unfiltered());
        assert_eq!(filtered_indices(&ds, &selection), vec![0, 1, 2]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            year: Some(2023),
            seniority: Some("Senior".into()),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &selection), vec![0]);
    }

    #[test]
    fn year_only_selection_keeps_both_2023_rows() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            year: Some(2023),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &selection), vec![0, 1]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            contract: Some("Full-time".into()),
            ..Default::default()
        };
        let first = filtered_indices(&ds, &selection);
        let second = filtered_indices(&ds, &selection);
        assert_eq!(first, second);
    }

    #[test]
    fn unmatched_selection_yields_empty_view() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            seniority: Some("Executive".into()),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &selection).is_empty());
    }
}
