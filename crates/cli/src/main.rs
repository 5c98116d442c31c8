//! Command Line Interface for the position economics calculator.
//!
//! This binary is presentation glue only: it supplies a complete input
//! snapshot, invokes the engine once, and renders the full output record.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clmm_econ_domain::outputs::PositionMetrics;
use clmm_econ_domain::snapshot::PositionSnapshot;
use clmm_econ_engine::compute::compute_metrics;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser)]
#[command(name = "clmm-econ")]
#[command(about = "Position economics and dynamic fee calculator for CLMM positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full metrics record for a scenario
    Report {
        /// Path to a JSON scenario file (built-in default scenario when omitted)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Print the raw output record as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Write the default scenario as a JSON template
    Template {
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Report { scenario, json } => {
            let snapshot = load_snapshot(scenario.as_deref())?;

            // Structural issues never abort the calculation; surface them
            // at the boundary and continue.
            for issue in snapshot.validate() {
                warn!("{issue}");
            }

            let metrics = compute_metrics(&snapshot);

            if *json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                print_report(&snapshot, &metrics);
            }
        }
        Commands::Template { output } => {
            let body = serde_json::to_string_pretty(&PositionSnapshot::default())?;
            match output {
                Some(path) => {
                    fs::write(path, body)
                        .with_context(|| format!("writing template to {}", path.display()))?;
                    println!("✅ Template written to {}", path.display());
                }
                None => println!("{body}"),
            }
        }
    }

    Ok(())
}

fn load_snapshot(path: Option<&Path>) -> Result<PositionSnapshot> {
    match path {
        Some(path) => {
            let body = fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            serde_json::from_str(&body)
                .with_context(|| format!("parsing scenario {}", path.display()))
        }
        None => Ok(PositionSnapshot::default()),
    }
}

fn pct(rate: f64) -> String {
    format!("{:.3}%", rate * 100.0)
}

fn print_report(snapshot: &PositionSnapshot, metrics: &PositionMetrics) {
    println!("\n📊 Position Economics Report");
    println!("════════════════════════════════════════");
    println!("Pool type:         {:?}", snapshot.pool_type);
    println!("Position value:    ${:.2}", snapshot.position_value);
    println!(
        "Range:             [{:.4}, {:.4}] @ {:.4}",
        snapshot.lower_price, snapshot.upper_price, snapshot.current_price
    );
    println!(
        "Scenario:          {:.4} -> {:.4}",
        snapshot.p0, snapshot.p1
    );

    println!("\n💸 Dynamic Fee");
    println!("────────────────────────────────────────");
    let stress_tag = if metrics.stress { "  ⚡ stress" } else { "" };
    println!("Fee rate:          {}{}", pct(metrics.dynamic_fee), stress_tag);
    println!("  Volatility:      {}", pct(metrics.fee_vol));
    println!("  Order flow:      {}", pct(metrics.fee_flow));
    println!("  Rate spread:     {}", pct(metrics.fee_rate_diff));
    println!("  Stress add-on:   {}", pct(metrics.fee_stress));

    println!("\n⚙️  Fee Economics (USD/day)");
    println!("────────────────────────────────────────");
    println!("Gross fees:        ${:.2}", metrics.gross_fees);
    println!("LVR:               -${:.2}", metrics.lvr);
    println!("MEV haircut:       -${:.2}", metrics.mev_haircut);
    println!("Rebalance cost:    -${:.2}", metrics.rebalance_cost);
    println!("Net fees:          ${:.2}", metrics.net_fees);
    println!("Break-even fee:    {}", pct(metrics.break_even_fee));
    println!("Simple APR:        {}", pct(metrics.apr));
    println!("Deficit covered:   ${:.2}", metrics.deficit_covered);
    println!("Buffer remaining:  ${:.2}", metrics.insurance_remaining);

    println!("\n📈 Valuation vs HODL");
    println!("────────────────────────────────────────");
    println!("Position at p1:    ${:.2}", metrics.position_value_at_p1);
    println!("  Excluding fees:  ${:.2}", metrics.position_without_fees);
    println!("HODL baseline:     ${:.2}", metrics.hodl_baseline);
    println!(
        "Divergence:        ${:.2} ({})",
        metrics.il_usd,
        pct(metrics.il_pct)
    );
    println!("PnL vs HODL:       ${:.2}", metrics.pnl_vs_hodl);
    println!("Net edge:          ${:.2}", metrics.net_edge);

    println!("\n🗳️  Rewards (USD/day)");
    println!("────────────────────────────────────────");
    println!("Emissions:         ${:.2}", metrics.emissions_usd);
    println!("Bribes:            ${:.2}", metrics.bribes_usd);
    println!("Total rewards:     ${:.2}", metrics.total_rewards_usd);

    println!("\n🧮 Yield Summary");
    println!("════════════════════════════════════════");
    println!("Fees APR:          {}", pct(metrics.fees_apr));
    println!("Rewards APR:       {}", pct(metrics.rewards_apr));
    println!("Total APR:         {}", pct(metrics.total_apr));
    println!("Net PnL w/rewards: ${:.2}/day", metrics.enhanced_net_pnl);
}
