use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, version prefix,
/// success probability, typical payload ceiling in kg).
const GENERATIONS: [(&str, &str, f64, f64); 5] = [
    ("v1.0", "F9 v1.0", 0.2, 1000.0),
    ("v1.1", "F9 v1.1", 0.35, 4500.0),
    ("FT", "F9 FT", 0.7, 6000.0),
    ("B4", "F9 B4", 0.75, 9600.0),
    ("B5", "F9 B5", 0.9, 15600.0),
];

const FLIGHTS_PER_GENERATION: usize = 12;

const SITES_BY_ERA: [&[&str]; 2] = [
    &["CCAFS LC-40", "VAFB SLC-4E"],
    &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"],
];

struct Row {
    flight: i64,
    site: String,
    class: i64,
    payload: f64,
    version: String,
    category: String,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for (gen_idx, &(category, prefix, p_success, ceiling)) in GENERATIONS.iter().enumerate() {
        let sites = SITES_BY_ERA[usize::from(gen_idx >= 2)];
        for _ in 0..FLIGHTS_PER_GENERATION {
            let flight = rows.len() as i64 + 1;
            // Round to the nearest kg; a few flights carry no payload.
            let payload = if rng.next_f64() < 0.05 {
                0.0
            } else {
                (rng.next_f64() * ceiling).round()
            };
            rows.push(Row {
                flight,
                site: rng.pick(sites).to_string(),
                class: i64::from(rng.next_f64() < p_success),
                payload,
                version: format!("{prefix} B{}", 1000 + flight),
                category: category.to_string(),
            });
        }
    }

    // CSV, with the unnamed index column pandas writes.
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    writer.write_record([
        "",
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for (i, r) in rows.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            r.flight.to_string(),
            r.site.clone(),
            r.class.to_string(),
            format!("{:.1}", r.payload),
            r.version.clone(),
            r.category.clone(),
        ])?;
    }
    writer.flush()?;

    // Parquet with the same columns.
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.version.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category.as_str()))),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {} launches to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
