//! Writes `games.csv`: a text column, a few numeric columns and a noisy
//! linear target, for trying the viewer without real data.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

const TITLES: [&str; 6] = [
    "Star Drift",
    "Crypt Runner",
    "Pixel Farm",
    "Iron Tide",
    "Moon Golf",
    "Hex Quest",
];

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args().nth(1).unwrap_or_else(|| "games.csv".into());
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let noise = Normal::new(0.0, 4.0).context("building noise distribution")?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer
        .write_record(["title", "hours_played", "price", "achievements", "rating"])
        .context("writing header")?;

    let n_rows = 200;
    for i in 0..n_rows {
        let title = format!("{} {}", TITLES[i % TITLES.len()], i / TITLES.len() + 1);
        let hours: f64 = rng.random_range(1.0..120.0);
        let price: f64 = rng.random_range(0.0..70.0);
        let achievements: u32 = rng.random_range(0..60);
        // rating grows with hours played
        let rating = (0.6 * hours + 20.0 + noise.sample(&mut rng)).clamp(0.0, 100.0);

        writer
            .write_record([
                title,
                format!("{hours:.1}"),
                format!("{price:.2}"),
                achievements.to_string(),
                format!("{rating:.1}"),
            ])
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("wrote {n_rows} rows to {output_path}");
    println!("Wrote {n_rows} games to {output_path}");
    Ok(())
}
