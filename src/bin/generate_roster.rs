//! Synthetic roster generator for Influencer Match
//!
//! Writes a CSV with the columns the roster loader requires. Output is
//! reproducible for a given seed.
//!
//! Run: cargo run --bin generate-roster -- [count] [output_path]

use serde::Serialize;
use std::path::Path;

const DEFAULT_COUNT: usize = 1000;
const DEFAULT_OUTPUT: &str = "data/influencers_top1000.csv";
const SEED: u64 = 42;

const PLATFORMS: &[(&str, u32)] = &[
    ("Instagram", 34),
    ("YouTube", 26),
    ("TikTok", 22),
    ("Twitter", 10),
    ("LinkedIn", 8),
];

const COUNTRIES: &[&str] = &[
    "USA", "India", "UK", "Brazil", "Germany", "Canada", "France", "Japan", "Australia",
    "Italy", "Spain", "Mexico", "UAE", "Singapore", "Netherlands",
];

const CATEGORIES: &[&str] = &[
    "fashion", "tech", "fitness", "food", "travel", "beauty", "music", "gaming", "education", "finance",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Chris", "Jamie", "Casey", "Morgan", "Cameron", "Sam", "Avery",
    "Riley", "Dakota", "Rowan", "Harper", "Reese", "Peyton", "Devin", "Skyler", "Elliot",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Brown", "Lee", "Martinez", "Davis", "Garcia", "Miller", "Wilson",
    "Anderson", "Moore", "Lopez", "Clark", "Lewis", "Walker", "Hall", "Young", "King", "Green",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "outlook.com", "yahoo.com", "influencerhub.io"];

#[derive(Debug, Serialize)]
struct RosterRow {
    person_name: String,
    email: String,
    followers: u64,
    platform: &'static str,
    category: &'static str,
    country: &'static str,
    hashtags: String,
}

/// xorshift64* generator
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform in (0, 1)
    fn next_f64(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 + 0.5) / (1u64 << 53) as f64
    }

    fn choice<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }

    fn weighted(&mut self, options: &[(&'static str, u32)]) -> &'static str {
        let total: u32 = options.iter().map(|(_, w)| w).sum();
        let mut pick = (self.next_u64() % total as u64) as u32;
        for (value, weight) in options {
            if pick < *weight {
                return *value;
            }
            pick -= weight;
        }
        options[options.len() - 1].0
    }

    /// Log-normal sample via Box-Muller
    fn lognormal(&mut self, mean: f64, sigma: f64) -> f64 {
        let (u1, u2) = (self.next_f64(), self.next_f64());
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (mean + sigma * z).exp()
    }
}

fn make_row(rng: &mut Rng) -> RosterRow {
    let name = format!("{} {}", rng.choice(FIRST_NAMES), rng.choice(LAST_NAMES));
    let email = format!("{}@{}", name.to_lowercase().replace(' ', "."), rng.choice(EMAIL_DOMAINS));
    let platform = rng.weighted(PLATFORMS);
    let country = rng.choice(COUNTRIES);
    let category = rng.choice(CATEGORIES);
    let followers = rng.lognormal(12.0, 0.7).clamp(1e4, 2.5e7) as u64;

    RosterRow {
        person_name: name,
        email,
        followers,
        platform,
        category,
        country,
        hashtags: format!("#{} #influencer #trending", category),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let count = match args.next() {
        Some(raw) => raw.parse::<usize>()?,
        None => DEFAULT_COUNT,
    };
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    if let Some(parent) = Path::new(&output).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    println!("Generating {} influencer records...", count);

    let mut rng = Rng::new(SEED);
    let mut writer = csv::Writer::from_path(&output)?;
    for _ in 0..count {
        writer.serialize(make_row(&mut rng))?;
    }
    writer.flush()?;

    println!("Generated {} influencer records -> {}", count, output);
    Ok(())
}
