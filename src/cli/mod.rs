mod render;
mod series;

use clap::{Parser, Subcommand};
use seriesfill::services::ConfigService;

use series::SeriesArgs;

/// Gap-free day/week/month series from sparse records
#[derive(Parser)]
#[command(name = "seriesfill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bucketed, gap-filled series
    Series(SeriesArgs),

    /// Print totals and peak buckets for the series
    Stats(SeriesArgs),

    /// Show the effective configuration
    Config {
        /// Write the current configuration to ~/.seriesfill/config.json
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Series(args) => {
                let json = args.json;
                let (series, granularity) = args.build()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&series)?);
                } else {
                    print!("{}", render::series_table(&series, granularity));
                }
                Ok(())
            }
            Commands::Stats(args) => {
                let json = args.json;
                let (series, _) = args.build()?;
                let stats = seriesfill::types::SeriesStats::from_series(&series);
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print!("{}", render::stats_text(&stats));
                }
                Ok(())
            }
            Commands::Config { init } => {
                let service = ConfigService::new()?;
                let config = service.load()?;
                if init {
                    let path = service.save(&config)?;
                    eprintln!("Wrote {}", path.display());
                }
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
        }
    }
}
