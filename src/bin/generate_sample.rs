//! Writes a synthetic post export in the layout the report reads: Latin-1
//! encoded, with a few duplicate rows, missing follower counts, zero
//! followers, malformed dates and empty messages mixed in.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Duration, NaiveDate};
use encoding_rs::WINDOWS_1252;

const DEFAULT_OUTPUT: &str = "fb_sample_hwk-2 (1).csv";
const POSTS: usize = 400;

const HEADER: [&str; 14] = [
    "Page Name",
    "User Name",
    "Facebook Id",
    "Followers at Posting",
    "Post Created Date",
    "Type",
    "Total Interactions",
    "Likes",
    "Comments",
    "Shares",
    "Love",
    "Message",
    "Link Text",
    "URL",
];

const PAGES: [(&str, f64); 4] = [
    ("Café Découverte", 12_000.0),
    ("Acme Outdoors", 85_000.0),
    ("Señor Tacos", 4_500.0),
    ("Daily Tech Brief", 230_000.0),
];

/// Post type with its typical interactions per follower.
const TYPES: [(&str, f64); 5] = [
    ("Photo", 0.012),
    ("Video", 0.020),
    ("Native Video", 0.025),
    ("Link", 0.004),
    ("Status", 0.008),
];

const MESSAGES: [&str; 6] = [
    "New menu this week, come say hello!",
    "Crème brûlée is back for the holidays",
    "Behind the scenes of our latest shoot",
    "Five tips for your next trail run",
    "¿Ya probaste nuestro nuevo taco al pastor?",
    "Read the full story on our blog",
];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn post_row(rng: &mut SimpleRng, id: usize) -> Vec<String> {
    let (page, audience) = PAGES[rng.below(PAGES.len())];
    let (kind, rate) = TYPES[rng.below(TYPES.len())];

    let followers = (audience * rng.gauss(1.0, 0.05)).max(0.0).round();
    let total = (followers * rate * rng.gauss(1.0, 0.6).abs()).round() as u64;
    let comments = total / 10;
    let shares = total / 8;
    let love = total / 20;
    let likes = total - comments - shares - love;

    let start = NaiveDate::from_ymd_opt(2019, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let posted = start + Duration::minutes(rng.below(365 * 24 * 60) as i64);

    let followers_field = if rng.chance(0.03) {
        "N/A".to_owned()
    } else if rng.chance(0.02) {
        "0".to_owned()
    } else {
        format!("{followers}")
    };
    let date_field = if rng.chance(0.02) {
        "sometime last spring".to_owned()
    } else {
        format!("{} EDT", posted.format("%Y-%m-%d %H:%M:%S"))
    };
    let message = if rng.chance(0.1) {
        String::new()
    } else {
        MESSAGES[rng.below(MESSAGES.len())].to_owned()
    };
    let link_text = if kind == "Link" { "Read more".to_owned() } else { String::new() };

    vec![
        page.to_owned(),
        page.to_lowercase().replace(' ', ""),
        format!("{}", 100_000 + id),
        followers_field,
        date_field,
        kind.to_owned(),
        total.to_string(),
        likes.to_string(),
        comments.to_string(),
        shares.to_string(),
        love.to_string(),
        message,
        link_text,
        format!("https://example.com/posts/{id}"),
    ]
}

fn main() -> anyhow::Result<()> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let mut rng = SimpleRng::new(42);
    let mut rows: Vec<Vec<String>> = (0..POSTS).map(|id| post_row(&mut rng, id)).collect();

    // Exact repeats, as scraped exports tend to contain.
    for _ in 0..POSTS / 40 {
        let dup = rows[rng.below(rows.len())].clone();
        rows.push(dup);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    let text = String::from_utf8(writer.into_inner().map_err(|e| e.into_error())?)?;

    let (bytes, _, unmappable) = WINDOWS_1252.encode(&text);
    if unmappable {
        bail!("sample text contains characters outside Latin-1");
    }
    std::fs::write(&output, &bytes)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} posts ({} duplicates) to {}",
        rows.len(),
        rows.len() - POSTS,
        output.display()
    );
    Ok(())
}
