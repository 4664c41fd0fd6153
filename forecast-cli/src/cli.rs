use chrono::Local;
use clap::Parser;
use forecast_core::{ClientConfig, build_report, connect};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "forecast",
    version,
    about = "Current weather, a 3-hour outlook and tomorrow's rain forecast for a city"
)]
pub struct Cli {
    /// City to get weather for, e.g. "Bangalore".
    #[arg(short, long)]
    pub city: String,

    /// OpenWeatherMap API key.
    #[arg(short = 'k', long = "api-key", visible_alias = "api_key")]
    pub api_key: String,

    /// Print debug logs to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let provider = connect(&self.api_key, ClientConfig::default())?;

        let now = Local::now().fixed_offset();
        debug!(city = %self.city, %now, "building report");

        let report = build_report(provider.as_ref(), &self.city, now).await?;
        println!("{}", report.render()?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["forecast", "-c", "Bangalore", "-k", "KEY"]).unwrap();
        assert_eq!(cli.city, "Bangalore");
        assert_eq!(cli.api_key, "KEY");
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_long_flags() {
        let cli = Cli::try_parse_from(["forecast", "--city", "Pune", "--api-key", "KEY", "-v"]).unwrap();
        assert_eq!(cli.city, "Pune");
        assert!(cli.verbose);
    }

    #[test]
    fn both_flags_are_required() {
        assert!(Cli::try_parse_from(["forecast", "-c", "Pune"]).is_err());
        assert!(Cli::try_parse_from(["forecast", "-k", "KEY"]).is_err());
    }
}
