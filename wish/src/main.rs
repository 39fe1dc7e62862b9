//! Christmas linear search in the terminal.
//!
//! Make a wish, sleep through the night, then check the presents under the
//! tree one by one.
//!
//! ```bash
//! cargo run -p wish
//! cargo run -p wish -- --seed 7 --auto "Lego Set"
//! cargo run -p wish -- --json
//! ```

mod headless;

use std::io::{self, stdout};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wish_core::headless::HeadlessConfig;
use wish_core::SessionConfig;

use headless::Format;

#[derive(Parser, Debug)]
#[command(name = "wish", version, about = "Find your Christmas wish with linear search")]
struct Args {
    /// Seed for reproducible presents
    #[arg(long, env = "WISH_SEED")]
    seed: Option<u64>,

    /// Chance (0 to 1) that Santa brings your wish
    #[arg(long, env = "WISH_CHANCE")]
    wish_chance: Option<f64>,

    /// Print every payload as one JSON line
    #[arg(long)]
    json: bool,

    /// Play a whole story for this wish and exit
    #[arg(long, value_name = "WISH")]
    auto: Option<String>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(chance) = self.wish_chance {
            config = config.with_wish_chance(chance);
        }
        config
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays a clean protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = HeadlessConfig::quick_start().with_session(args.session_config());
    let format = if args.json { Format::Json } else { Format::Text };

    let mut out = stdout().lock();
    match &args.auto {
        Some(wish) => headless::run_auto(config, wish, &mut out, format),
        None => headless::run_headless(config, io::stdin().lock(), &mut out, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_build_session_config() {
        let args = Args::parse_from(["wish", "--seed", "7", "--wish-chance", "0.5", "--json"]);
        let config = args.session_config();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.corpus.wish_chance, 0.5);
        assert!(args.json);
        assert!(args.auto.is_none());
    }

    #[test]
    fn test_auto_takes_a_wish() {
        let args = Args::parse_from(["wish", "--auto", "Lego Set"]);
        assert_eq!(args.auto.as_deref(), Some("Lego Set"));
    }
}
