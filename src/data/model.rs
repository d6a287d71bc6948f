use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record – one salary observation (one row of the source table)
// ---------------------------------------------------------------------------

/// A single salary observation with the fixed dashboard schema.
/// Salaries are already normalized to annual USD by the source dataset.
/// The serde aliases accept the original dataset's Portuguese field names.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Record {
    #[serde(alias = "ano", alias = "work_year")]
    pub year: i32,
    #[serde(alias = "cargo", alias = "job_title")]
    pub role: String,
    #[serde(alias = "senioridade", alias = "experience_level")]
    pub seniority: String,
    #[serde(alias = "contrato", alias = "employment_type")]
    pub contract: String,
    #[serde(alias = "tamanho_empresa")]
    pub company_size: String,
    #[serde(alias = "remoto")]
    pub remote_ratio: String,
    /// ISO-3 code of the employee's country of residence.
    #[serde(alias = "residencia_iso3", alias = "employee_residence")]
    pub country: String,
    #[serde(alias = "usd", alias = "salary_in_usd")]
    pub salary_usd: f64,
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed filter option lists.
/// Immutable after construction; shared read-only across interactions.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All records in source order.
    pub records: Vec<Record>,
    /// Sorted unique years, for the year selector.
    pub years: Vec<i32>,
    /// Sorted unique seniority levels.
    pub seniorities: Vec<String>,
    /// Sorted unique contract types.
    pub contracts: Vec<String>,
    /// Sorted unique company sizes.
    pub company_sizes: Vec<String>,
}

impl SalaryDataset {
    /// Build selector option lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut years: BTreeSet<i32> = BTreeSet::new();
        let mut seniorities: BTreeSet<String> = BTreeSet::new();
        let mut contracts: BTreeSet<String> = BTreeSet::new();
        let mut company_sizes: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            years.insert(rec.year);
            seniorities.insert(rec.seniority.clone());
            contracts.insert(rec.contract.clone());
            company_sizes.insert(rec.company_size.clone());
        }

        SalaryDataset {
            records,
            years: years.into_iter().collect(),
            seniorities: seniorities.into_iter().collect(),
            contracts: contracts.into_iter().collect(),
            company_sizes: company_sizes.into_iter().collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
