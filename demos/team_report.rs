use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use handball_stats::{
    AggregationConfig, MemoryLoader, RatingWeights, SortKey, SortState, StatsClient, StatsView,
};

#[derive(Debug, Parser)]
#[command(name = "team_report")]
#[command(about = "Aggregate player statistics from a match export", long_about = None)]
struct Cli {
    /// JSON array of match records.
    matches: PathBuf,
    /// Name of the recording team, used to tell home from away.
    team: String,
    /// JSON object of rating weights; the standard table when omitted.
    #[arg(short, long)]
    weights: Option<PathBuf>,
    #[arg(long, default_value_t = StatsView::General)]
    view: StatsView,
    /// Column to sort by; jersey number ascending when omitted.
    #[arg(short, long)]
    sort: Option<SortKey>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let weights = match &cli.weights {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read: {}", path.display()))?;
            RatingWeights::from_json_str(&json)?
        }
        None => RatingWeights::standard(),
    };
    let mut sort = SortState::default();
    if let Some(key) = cli.sort {
        sort.select(key);
    }

    let json = fs::read_to_string(&cli.matches)
        .with_context(|| format!("failed to read: {}", cli.matches.display()))?;
    let client = StatsClient::new(MemoryLoader::from_json(&json)?);
    let config = AggregationConfig::new(cli.team, weights);
    let stats = client.team_stats(None, &config).await?;

    println!(
        "{} matches: {} W / {} D / {} L",
        stats.included_matches.len(),
        stats.record.wins,
        stats.record.draws,
        stats.record.losses
    );

    let columns = cli.view.columns();
    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    println!("{:<20} {}", "player", header.join("  "));
    for row in handball_stats::project_state(&stats.rows, sort, cli.view) {
        let values: Vec<String> = columns
            .iter()
            .map(|c| format!("{:>width$.2}", c.value(row), width = c.to_string().len()))
            .collect();
        println!("{:<20} {}", row.name, values.join("  "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_name_is_required() {
        assert!(Cli::try_parse_from(["team_report", "matches.json"]).is_err());
    }

    #[test]
    fn test_view_and_sort_parse_by_name() {
        let cli = Cli::try_parse_from([
            "team_report",
            "matches.json",
            "HC Nord",
            "--view",
            "goalkeeping",
            "--sort",
            "save_percentage",
        ])
        .unwrap();
        assert_eq!(cli.team, "HC Nord");
        assert_eq!(cli.view, StatsView::Goalkeeping);
        assert_eq!(cli.sort, Some(SortKey::SavePercentage));
        assert!(cli.weights.is_none());

        let unknown = Cli::try_parse_from(["team_report", "m.json", "HC Nord", "--sort", "kills"]);
        assert!(unknown.is_err());
    }
}
