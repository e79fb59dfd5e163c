//! board-runner: headless client dashboard.
//!
//! Usage:
//!   board-runner --seed 12345 --clients 500 --segment premium --region sul
//!   board-runner --input clients.json --days 90 --json

use anyhow::Result;
use chrono::Utc;
use clientboard_core::{
    config::GeneratorConfig,
    dashboard::{Dashboard, DashboardView},
    display::{star_rating, DisplayConfig, HEALTHY_CHURN_RATE},
    filter::ClientFilter,
    source::{ClientSource, JsonFileSource, SyntheticSource},
    time_series::DEFAULT_MONTHS_BACK,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let months = parse_arg(&args, "--months", DEFAULT_MONTHS_BACK);
    let json = args.iter().any(|a| a == "--json");
    let dark = args.iter().any(|a| a == "--dark");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");
    let input = arg_value(&args, "--input");

    let filter = ClientFilter::parse(
        arg_value(&args, "--days").unwrap_or("all"),
        arg_value(&args, "--segment").unwrap_or("all"),
        arg_value(&args, "--region").unwrap_or("all"),
    )?;

    let reference = Utc::now();
    let view = match input {
        Some(path) => build_view(JsonFileSource::new(path), reference, months, filter)?,
        None => {
            let mut config = load_generator_config(data_dir)?;
            config.seed = parse_arg(&args, "--seed", config.seed);
            config.population = parse_arg(&args, "--clients", config.population);
            build_view(SyntheticSource::new(config)?, reference, months, filter)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&*view)?);
    } else {
        let display = DisplayConfig::default();
        let display = if dark { display.toggled() } else { display };
        print_summary(&view, &display);
    }
    Ok(())
}

fn build_view<S: ClientSource>(
    source: S,
    reference: chrono::DateTime<Utc>,
    months: u32,
    filter: ClientFilter,
) -> Result<std::sync::Arc<DashboardView>> {
    let mut dashboard = Dashboard::with_months_back(source, reference, months)?;
    Ok(dashboard.set_filter(filter))
}

fn load_generator_config(data_dir: &str) -> Result<GeneratorConfig> {
    if Path::new(data_dir).join("generator.json").exists() {
        GeneratorConfig::load(data_dir)
    } else {
        log::warn!("{data_dir}/generator.json not found, using built-in generator defaults");
        Ok(GeneratorConfig::default())
    }
}

fn print_summary(view: &DashboardView, display: &DisplayConfig) {
    let m = &view.metrics;

    println!("=== CLIENT DASHBOARD ===");
    println!("  as of:          {}", view.reference.format("%Y-%m-%d %H:%M UTC"));
    println!("  filter:         {}", describe_filter(&view.filter));
    println!("  total revenue:  {}", display.format_currency(m.total_revenue));
    println!("  clients:        {}", display.format_number(m.total_clients as u64));
    println!("  active:         {}", display.format_number(m.active_clients as u64));
    println!("  inactive rate:  {}", display.format_percent(m.inactive_rate));
    println!("  avg order:      {}", display.format_currency(m.average_order_value));
    println!("  avg lifetime:   {}", display.format_currency(m.customer_lifetime_value));
    println!(
        "  churn rate:     {} ({}, {})",
        display.format_percent(m.churn_rate),
        if m.churn_rate < HEALTHY_CHURN_RATE { "healthy" } else { "high" },
        display.churn_color(m.churn_rate)
    );
    println!("  theme:          {:?} on {}", display.theme, display.palette.background);

    println!();
    println!("=== REVENUE BY REGION ===");
    for r in &m.revenue_by_region {
        println!("  {:<14} {}", r.region.name(), display.format_currency(r.revenue));
    }

    println!();
    println!("=== MONTHLY SERIES ===");
    for p in &view.time_series {
        println!(
            "  {} | Revenue: {} | Txns: {} | New: {} | AOV: {}",
            p.month_label,
            display.format_currency(p.revenue),
            p.transactions,
            p.new_clients,
            display.format_currency(p.average_order_value)
        );
    }

    println!();
    println!("=== SEGMENT ANALYSIS ===");
    for s in &view.segment_analysis {
        println!(
            "  {:<9} | Clients: {} | Revenue: {} | Avg spend: {} | {:.1}/mo | {} {:.1}/5",
            s.segment.name(),
            display.format_number(s.client_count as u64),
            display.format_currency(s.revenue),
            display.format_currency(s.average_spend),
            s.purchase_frequency,
            star_rating(s.satisfaction),
            s.satisfaction
        );
    }

    println!();
    println!("=== TOP SPENDERS ===");
    for c in view.top_spenders.iter().take(5) {
        println!(
            "  {} {:<14} {:<9} {}",
            c.id,
            c.name,
            c.segment.name(),
            display.format_currency(c.total_spent)
        );
    }

    println!();
    println!("=== RECENT CLIENTS ===");
    for c in view.recent_clients.iter().take(5) {
        println!(
            "  {} {:<14} {:<13} {:<8} {}",
            c.id,
            c.name,
            c.region.name(),
            c.status.name(),
            c.registration_date.format("%Y-%m-%d")
        );
    }
}

fn describe_filter(filter: &ClientFilter) -> String {
    if filter.is_all() {
        return "all".into();
    }
    let days = filter
        .registered_within_days
        .map(|d| format!("last {d} days"))
        .unwrap_or_else(|| "any date".into());
    let segment = filter.segment.map(|s| s.name()).unwrap_or("any segment");
    let region = filter.region.map(|r| r.name()).unwrap_or("any region");
    format!("{days}, {segment}, {region}")
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
