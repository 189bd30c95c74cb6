use auralis_combat::duel::DuelOptions;
use auralis_combat::sim::order::SpeedTieRule;
use auralis_combat::tables::Weather;
use auralis_combat::{run, CliOptions};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--data dex.json] [--tables tables.json] [--a SPECIES_ID] [--b SPECIES_ID] \
[--level N] [--seed SEED] [--sims N] [--max-turns N] [--weather sun|rain|sand|hail] [--speed-tie attacker|coin]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut data_path = PathBuf::from("data/dex.json");
    let mut tables_path = None;
    let mut species_a = 6u32;
    let mut species_b = 9u32;
    let mut level = 50u8;
    let mut seed = 0u64;
    let mut sims = 1usize;
    let mut duel = DuelOptions::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                data_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--data requires a path (e.g. --data data/dex.json)")
                })?;
            }
            "--tables" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--tables requires a path"))?;
                tables_path = Some(PathBuf::from(path));
            }
            "--a" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--a requires a species id"))?;
                species_a = val.parse()?;
            }
            "--b" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--b requires a species id"))?;
                species_b = val.parse()?;
            }
            "--level" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--level requires a number"))?;
                level = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--sims" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims requires a number"))?;
                sims = val.parse()?;
            }
            "--max-turns" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-turns requires a number"))?;
                duel.max_turns = val.parse()?;
            }
            "--weather" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--weather requires sun, rain, sand or hail"))?;
                duel.weather = match val.to_ascii_lowercase().as_str() {
                    "none" | "clear" => None,
                    other => Some(
                        Weather::from_name(other)
                            .ok_or_else(|| anyhow::anyhow!("Unknown weather {other}"))?,
                    ),
                };
            }
            "--speed-tie" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--speed-tie requires attacker or coin"))?;
                duel.speed_tie = SpeedTieRule::from_name(&val).ok_or_else(|| {
                    anyhow::anyhow!("--speed-tie must be attacker or coin, got {val}")
                })?;
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        data_path,
        tables_path,
        species_a,
        species_b,
        level,
        seed,
        sims,
        duel,
    })
}

const DEFAULT_LOG_FILTER: &str = "info";

/// `RUST_LOG` when it is set and parses, otherwise `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
    let opts = parse_args()?;
    run(opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn missing_rust_log_falls_back_to_info() {
        assert_eq!(
            EnvFilter::new(DEFAULT_LOG_FILTER).max_level_hint(),
            Some(LevelFilter::INFO)
        );
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
            assert_eq!(env_filter().max_level_hint(), Some(LevelFilter::INFO));
        }
    }
}
