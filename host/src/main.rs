use clap::Parser;
use host::{mst_cost, proven_mst_cost, DEFAULT_VERTICES};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mst-cost")]
#[command(about = "Prints the minimum spanning tree cost V^2 - V + 1")]
struct Cli {
    /// Number of vertices
    #[arg(short, long, default_value_t = DEFAULT_VERTICES)]
    vertices: u64,

    /// Check the cost against the arithmetic circuit before printing
    #[arg(long)]
    prove: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cost = if cli.prove {
        let cost = proven_mst_cost(cli.vertices)?;
        info!(vertices = cli.vertices, cost, "cost verified by circuit");
        cost
    } else {
        mst_cost(cli.vertices)?
    };

    println!("{cost}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["mst-cost"]).unwrap();
        assert_eq!(cli.vertices, 5);
        assert!(!cli.prove);
    }

    #[test]
    fn test_vertices_and_prove() {
        let cli = Cli::try_parse_from(["mst-cost", "-v", "7", "--prove"]).unwrap();
        assert_eq!(cli.vertices, 7);
        assert!(cli.prove);
    }

    #[test]
    fn test_negative_vertices_rejected() {
        assert!(Cli::try_parse_from(["mst-cost", "--vertices", "-1"]).is_err());
    }
}
