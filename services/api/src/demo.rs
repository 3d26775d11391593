use crate::infra::{sample_metrics, InMemoryDealScoreRepository};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use dealscope::error::AppError;
use dealscope::scoring::{
    DealFilter, DealScore, DealService, MetricsCatalog, Scenario, ScoringEngine, ZipMetrics,
};
use dealscope::underwriting::{underwrite, ManagementFee, UnderwritingInput};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Metrics CSV to score (defaults to the built-in NJ/PA sample ZIPs)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Scenario to rank under: S1, S2, or S3
    #[arg(long, default_value = "S2")]
    pub(crate) scenario: String,
    /// Keep only ZIPs in this state
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Keep only ZIPs scoring at least this value
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// Cap the number of rows printed
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Metrics CSV to score (defaults to the built-in NJ/PA sample ZIPs)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Scenario highlighted in the breakdown section
    #[arg(long, default_value = "S2")]
    pub(crate) scenario: String,
    /// Skip the underwriting portion of the demo
    #[arg(long)]
    pub(crate) skip_underwriting: bool,
}

fn load_metrics(csv: Option<PathBuf>) -> Result<Vec<ZipMetrics>, AppError> {
    match csv {
        Some(path) => Ok(MetricsCatalog::from_path(&path)?.into_records()),
        None => Ok(sample_metrics()),
    }
}

fn seeded_service(metrics: &[ZipMetrics]) -> Result<DealService<InMemoryDealScoreRepository>, AppError> {
    let service = DealService::new(
        ScoringEngine::standard(),
        Arc::new(InMemoryDealScoreRepository::default()),
    );
    service.refresh(metrics)?;
    Ok(service)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        csv,
        scenario,
        state,
        min_score,
        limit,
    } = args;

    let scenario = Scenario::parse(&scenario)?;
    let metrics = load_metrics(csv)?;
    let service = seeded_service(&metrics)?;
    let deals = service.ranked(
        scenario,
        &DealFilter {
            state,
            min_score,
            limit,
        },
    )?;

    print_ranking(scenario, &deals);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        csv,
        scenario,
        skip_underwriting,
    } = args;

    let highlighted = Scenario::parse(&scenario)?;
    let metrics = load_metrics(csv)?;
    let service = seeded_service(&metrics)?;

    println!("=== Deal scores across scenarios ===");
    println!("{:<7} {:<14} {:<3} {:>5} {:>5} {:>5}", "zip", "city", "st", "S1", "S2", "S3");
    let mut rows: Vec<&ZipMetrics> = metrics.iter().collect();
    rows.sort_by(|a, b| a.zip_code.cmp(&b.zip_code));
    for record in rows {
        let mut scores = [0_u8; 3];
        for (slot, scenario) in scores.iter_mut().zip(Scenario::ALL) {
            if let Some(deal) = service.current(&record.zip_code, scenario)? {
                *slot = deal.score;
            }
        }
        println!(
            "{:<7} {:<14} {:<3} {:>5} {:>5} {:>5}",
            record.zip_code, record.city, record.state, scores[0], scores[1], scores[2]
        );
    }

    let ranked = service.ranked(highlighted, &DealFilter::default())?;
    if let Some(top) = ranked.first() {
        println!();
        println!(
            "=== {} breakdown for top ZIP {} ({}) ===",
            highlighted.label(),
            top.zip_code,
            top.city
        );
        for entry in &top.breakdown {
            println!(
                "  {:<13} weight {:<5.2} sub-score {:>6.1} contribution {:>+7.2}",
                entry.dimension.label(),
                entry.weight,
                entry.sub_score,
                entry.contribution
            );
        }
        println!("  total (clamped): {}", top.score);
    }

    if !skip_underwriting {
        print_underwriting_sample()?;
    }

    Ok(())
}

fn print_ranking(scenario: Scenario, deals: &[DealScore]) {
    println!("=== Ranked deals, scenario {} ===", scenario.label());
    println!("{:<5} {:<7} {:<14} {:<3} {:>5}", "rank", "zip", "city", "st", "score");
    for (index, deal) in deals.iter().enumerate() {
        println!(
            "{:<5} {:<7} {:<14} {:<3} {:>5}",
            index + 1,
            deal.zip_code,
            deal.city,
            deal.state,
            deal.score
        );
    }
}

fn print_underwriting_sample() -> Result<(), AppError> {
    let input = UnderwritingInput {
        purchase_price: 300_000.0,
        rehab_cost: 50_000.0,
        after_repair_value: 400_000.0,
        monthly_rent: 2_500.0,
        property_taxes: 6_000.0,
        insurance: 1_200.0,
        property_management: ManagementFee::FlatMonthly(250.0),
        vacancy_rate: 5.0,
        loan_amount: 240_000.0,
        interest_rate: 7.5,
        loan_term_years: 30,
        closing_costs: 9_000.0,
    };
    let output = underwrite(&input)?;

    println!();
    println!("=== Underwriting sample: $300k purchase, $50k rehab, $400k ARV ===");
    println!("  total investment   ${:>12.2}", output.total_investment);
    println!("  monthly mortgage   ${:>12.2}", output.monthly_mortgage);
    println!("  operating expenses ${:>12.2}/mo", output.operating_expenses);
    println!("  total expenses     ${:>12.2}/mo", output.monthly_expenses);
    println!("  NOI                ${:>12.2}/mo", output.monthly_noi);
    println!("  cap rate           {:>13.2}%", output.cap_rate);
    println!("  cash-on-cash       {:>13.2}%", output.cash_on_cash);
    if output.dscr.is_finite() {
        println!("  DSCR               {:>14.2}", output.dscr);
    } else {
        println!("  DSCR               {:>14}", "n/a (no debt)");
    }
    println!("  flip margin/ROI    {:>13.2}%", output.flip_margin);
    println!("  risk level         {:>14}", output.risk_level.label());
    Ok(())
}
