//! Deterministic synthetic sample table.

use super::table::Table;
use super::value::Value;

const SAMPLE_SEED: u64 = 42;
const SAMPLE_ROWS: usize = 100;
const MISSING_INCOME_RATE: f64 = 0.1;

/// Build the fixed-seed sample dataset used when a run supplies no table.
///
/// 100 rows with columns `age`, `income`, `category`, `score`, `target`;
/// 10% of `income` cells are replaced with the missing marker.
/// Deterministic across runs for a given seed.
pub fn sample_table() -> Table {
    let mut rng = fastrand::Rng::with_seed(SAMPLE_SEED);

    let mut age = Vec::with_capacity(SAMPLE_ROWS);
    let mut income = Vec::with_capacity(SAMPLE_ROWS);
    let mut category = Vec::with_capacity(SAMPLE_ROWS);
    let mut score = Vec::with_capacity(SAMPLE_ROWS);
    let mut target = Vec::with_capacity(SAMPLE_ROWS);

    for _ in 0..SAMPLE_ROWS {
        age.push(Value::Number(rng.i64(18..80) as f64));
        income.push(Value::Number(normal(&mut rng, 50_000.0, 15_000.0)));
        category.push(Value::Text(
            ["A", "B", "C"][rng.usize(0..3)].to_string(),
        ));
        score.push(Value::Number(rng.f64() * 100.0));
        target.push(Value::Number(rng.i64(0..2) as f64));
    }

    let missing_target = (SAMPLE_ROWS as f64 * MISSING_INCOME_RATE) as usize;
    let mut blanked = 0;
    while blanked < missing_target {
        let row = rng.usize(0..SAMPLE_ROWS);
        if !income[row].is_missing() {
            income[row] = Value::Missing;
            blanked += 1;
        }
    }

    Table::from_columns(vec![
        ("age".to_string(), age),
        ("income".to_string(), income),
        ("category".to_string(), category),
        ("score".to_string(), score),
        ("target".to_string(), target),
    ])
    .expect("sample columns have equal lengths")
}

/// Draw from a normal distribution via the Box-Muller transform.
fn normal(rng: &mut fastrand::Rng, mean: f64, std: f64) -> f64 {
    let u1 = rng.f64().max(f64::MIN_POSITIVE);
    let u2 = rng.f64();
    mean + std * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
