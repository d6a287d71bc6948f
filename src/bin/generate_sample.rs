use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[(self.next_u64() % options.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct SampleRow {
    year: i32,
    role: String,
    seniority: String,
    contract: String,
    company_size: String,
    remote_ratio: String,
    country: String,
    salary_usd: f64,
}

/// Base salary per role, scaled per seniority, with lognormal-ish noise.
fn sample_rows(rng: &mut SimpleRng, n: usize) -> Vec<SampleRow> {
    let years = [2021, 2022, 2023, 2024];
    let roles: [(&str, f64); 6] = [
        ("Data Scientist", 120_000.0),
        ("Data Analyst", 75_000.0),
        ("Data Engineer", 110_000.0),
        ("ML Engineer", 135_000.0),
        ("Analytics Engineer", 100_000.0),
        ("Research Scientist", 140_000.0),
    ];
    let seniorities: [(&str, f64); 4] = [
        ("Junior", 0.6),
        ("Mid-level", 0.85),
        ("Senior", 1.1),
        ("Executive", 1.6),
    ];
    let contracts = ["Full-time", "Part-time", "Contract", "Freelance"];
    let company_sizes = ["Small", "Medium", "Large"];
    let remote = ["Remote", "Hybrid", "In-person"];
    let countries = ["USA", "GBR", "DEU", "BRA", "IND", "CAN", "ESP"];

    (0..n)
        .map(|_| {
            let &(role, base) = rng.pick(&roles);
            let &(seniority, factor) = rng.pick(&seniorities);
            let salary = rng.gauss(base * factor, base * factor * 0.18).max(15_000.0);
            SampleRow {
                year: *rng.pick(&years),
                role: role.to_string(),
                seniority: seniority.to_string(),
                contract: rng.pick(&contracts).to_string(),
                company_size: rng.pick(&company_sizes).to_string(),
                remote_ratio: rng.pick(&remote).to_string(),
                country: rng.pick(&countries).to_string(),
                salary_usd: salary.round(),
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        "year",
        "role",
        "seniority",
        "contract",
        "company_size",
        "remote_ratio",
        "country",
        "salary_usd",
    ])?;
    for row in rows {
        writer.write_record([
            row.year.to_string(),
            row.role.clone(),
            row.seniority.clone(),
            row.contract.clone(),
            row.company_size.clone(),
            row.remote_ratio.clone(),
            row.country.clone(),
            format!("{}", row.salary_usd),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let year_array = Int32Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>());
    let role_array = StringArray::from(rows.iter().map(|r| r.role.as_str()).collect::<Vec<_>>());
    let seniority_array =
        StringArray::from(rows.iter().map(|r| r.seniority.as_str()).collect::<Vec<_>>());
    let contract_array =
        StringArray::from(rows.iter().map(|r| r.contract.as_str()).collect::<Vec<_>>());
    let size_array =
        StringArray::from(rows.iter().map(|r| r.company_size.as_str()).collect::<Vec<_>>());
    let remote_array =
        StringArray::from(rows.iter().map(|r| r.remote_ratio.as_str()).collect::<Vec<_>>());
    let country_array =
        StringArray::from(rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>());
    let salary_array = Float64Array::from(rows.iter().map(|r| r.salary_usd).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int32, false),
        Field::new("role", DataType::Utf8, false),
        Field::new("seniority", DataType::Utf8, false),
        Field::new("contract", DataType::Utf8, false),
        Field::new("company_size", DataType::Utf8, false),
        Field::new("remote_ratio", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("salary_usd", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(year_array),
            Arc::new(role_array),
            Arc::new(seniority_array),
            Arc::new(contract_array),
            Arc::new(size_array),
            Arc::new(remote_array),
            Arc::new(country_array),
            Arc::new(salary_array),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = sample_rows(&mut rng, 500);

    write_csv(&rows, "sample_data.csv")?;
    write_parquet(&rows, "sample_data.parquet")?;

    println!(
        "Wrote {} salary records to sample_data.csv and sample_data.parquet",
        rows.len()
    );
    Ok(())
}
