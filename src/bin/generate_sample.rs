//! Write a small synthetic set of the three wide tables.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (default: current directory).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

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

    /// Uniform in `[-1, 1)`.
    fn jitter(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

/// (country, population in 2000, life expectancy in 2000, GNI per capita in 2000)
const COUNTRIES: &[(&str, f64, f64, f64)] = &[
    ("United States", 282_000_000.0, 76.6, 36_000.0),
    ("Germany", 81_500_000.0, 78.1, 27_000.0),
    ("India", 1_057_000_000.0, 62.5, 2_300.0),
    ("Brazil", 175_000_000.0, 70.1, 7_200.0),
    ("Nigeria", 122_000_000.0, 46.3, 1_700.0),
    ("Japan", 127_000_000.0, 81.1, 26_500.0),
];

const YEARS: std::ops::RangeInclusive<i32> = 2000..=2020;

/// GNI is written in thousands of dollars, with a `k` marker from ten
/// thousand upwards, the way the published table mixes both forms.
fn format_gni(dollars: f64) -> String {
    let thousands = dollars / 1000.0;
    if thousands >= 10.0 {
        format!("{thousands:.1}k")
    } else {
        format!("{thousands:.2}")
    }
}

fn write_table(path: &Path, rows: &[(&str, Vec<String>)]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    let mut header = vec!["country".to_string()];
    header.extend(YEARS.map(|y| y.to_string()));
    writer.write_record(&header)?;
    for (country, cells) in rows {
        let mut record = vec![country.to_string()];
        record.extend(cells.iter().cloned());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let mut pop_rows = Vec::new();
    let mut lex_rows = Vec::new();
    let mut gni_rows = Vec::new();

    for &(country, pop0, lex0, gni0) in COUNTRIES {
        let growth = 1.0 + 0.01 * (1.0 + rng.jitter() * 0.5);
        let mut pop = Vec::new();
        let mut lex = Vec::new();
        let mut gni = Vec::new();
        for (i, _year) in YEARS.enumerate() {
            let t = i as f64;
            pop.push(format!("{:.0}", pop0 * growth.powf(t)));
            lex.push(format!("{:.1}", lex0 + 0.2 * t + 0.3 * rng.jitter()));
            gni.push(format_gni(gni0 * (1.0 + 0.03 * t) * (1.0 + 0.02 * rng.jitter())));
        }
        pop_rows.push((country, pop));
        lex_rows.push((country, lex));
        gni_rows.push((country, gni));
    }

    // One blank cell (read back as zero) and one country missing from the
    // GNI table, which the join drops entirely.
    if let Some((_, cells)) = lex_rows.last_mut() {
        if let Some(first) = cells.first_mut() {
            first.clear();
        }
    }
    gni_rows.pop();

    write_table(&out_dir.join("pop.csv"), &pop_rows)?;
    write_table(&out_dir.join("lex.csv"), &lex_rows)?;
    write_table(&out_dir.join("ny_gnp_pcap_pp_cd.csv"), &gni_rows)?;

    println!(
        "Wrote {} countries x {} years to {}",
        COUNTRIES.len(),
        YEARS.count(),
        out_dir.display()
    );
    Ok(())
}
