//! Subcommand handlers
//!
//! Handlers write to the supplied writer so they can be driven from tests.

use crate::settings::load_config;
use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::ArgMatches;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use whatif_calendar::add_business_days;
use whatif_engine::{
    parse_due_date, BacklogItem, BatchPolicy, Clock, EngineConfig, FixedClock, FixedSample,
    ForecastEngine, ForecastResult, PortfolioForecast, PortfolioForecaster, RawBacklogItem,
    RiskDrivers, SampleSource, Scenario, SeededSampler, ShockAction, ShockDirective,
    StrategicAdvice, SystemClock,
};

/// Dispatch parsed arguments to a subcommand
///
/// # Errors
/// Propagates configuration, input and validation failures.
pub fn run(matches: &ArgMatches, out: &mut impl Write) -> anyhow::Result<()> {
    let Some((name, args)) = matches.subcommand() else {
        bail!("no subcommand given");
    };

    match name {
        "forecast" => forecast(args, &engine_config(args)?, out),
        "backlog" => backlog(args, &engine_config(args)?, out),
        "walk" => walk(args, out),
        other => bail!("unknown subcommand {other}"),
    }
}

fn engine_config(args: &ArgMatches) -> anyhow::Result<EngineConfig> {
    load_config(args.get_one::<String>("config").map(Path::new))
}

fn forecast(args: &ArgMatches, config: &EngineConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let key = args
        .get_one::<String>("key")
        .ok_or_else(|| anyhow!("--key is required"))?;
    let item = BacklogItem::try_from(RawBacklogItem {
        key: key.clone(),
        due_date: args.get_one::<String>("due").cloned(),
        assignee_id: args.get_one::<String>("assignee").cloned(),
        summary: None,
        status: None,
        priority: None,
    })
    .context("--due")?;

    let scenario = scenario_from(args)?;
    let clock = FixedClock(today_from(args)?);
    let mut sampler: Box<dyn SampleSource> = match (
        args.get_one::<f64>("sample"),
        args.get_one::<u64>("seed"),
    ) {
        (Some(sample), _) => Box::new(FixedSample(*sample)),
        (None, Some(seed)) => Box::new(SeededSampler::from_seed(*seed)),
        (None, None) => Box::new(SeededSampler::for_key(&item.key)),
    };

    let result = ForecastEngine::new(config.clone()).forecast(
        &item,
        &scenario.drivers,
        scenario.shock.as_ref(),
        &clock,
        sampler.as_mut(),
    )?;
    let advice = StrategicAdvice::for_level(result.risk_level);

    if args.get_flag("json") {
        let value = json!({ "key": item.key, "forecast": result, "advice": advice });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "{}", format_result(&item.key, &result))?;
        writeln!(out, "{}: {}", advice.headline, advice.recommendation)?;
    }
    Ok(())
}

fn backlog(args: &ArgMatches, config: &EngineConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let path = args
        .get_one::<String>("input")
        .ok_or_else(|| anyhow!("--input is required"))?;
    let text = std::fs::read_to_string(path).with_context(|| format!("reading backlog {path}"))?;
    let items: Vec<RawBacklogItem> =
        serde_json::from_str(&text).with_context(|| format!("parsing backlog {path}"))?;

    let policy = if args.get_flag("abort-on-invalid") {
        BatchPolicy::Abort
    } else {
        BatchPolicy::SkipInvalid
    };
    let scenario = scenario_from(args)?;
    let clock = FixedClock(today_from(args)?);

    let forecast = PortfolioForecaster::new(ForecastEngine::new(config.clone()))
        .with_policy(policy)
        .forecast(&items, &scenario, &clock)?;

    if args.get_flag("json") {
        writeln!(out, "{}", serde_json::to_string_pretty(&portfolio_json(&forecast))?)?;
    } else {
        write_portfolio_text(&forecast, out)?;
    }
    Ok(())
}

fn walk(args: &ArgMatches, out: &mut impl Write) -> anyhow::Result<()> {
    let from = args
        .get_one::<String>("from")
        .ok_or_else(|| anyhow!("--from is required"))?;
    let from = parse_due_date(from).context("--from")?;
    let days = args.get_one::<u64>("days").copied().unwrap_or(0);

    let date = add_business_days(from, days)
        .ok_or_else(|| anyhow!("walking {days} working days from {from} leaves the calendar range"))?;
    writeln!(out, "{date}")?;
    Ok(())
}

fn scenario_from(args: &ArgMatches) -> anyhow::Result<Scenario> {
    let driver = |name: &str| args.get_one::<f64>(name).copied().unwrap_or(0.0);
    let drivers = RiskDrivers::new(driver("cognitive"), driver("complexity"), driver("absence"))?;

    let members: Vec<String> = args
        .get_many::<String>("shock-member")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let scenario = Scenario::new(drivers);
    if members.is_empty() {
        Ok(scenario)
    } else {
        Ok(scenario.with_shock(ShockDirective::new(members, ShockAction::Sick3)))
    }
}

fn today_from(args: &ArgMatches) -> anyhow::Result<NaiveDate> {
    match args.get_one::<String>("today") {
        Some(today) => Ok(parse_due_date(today).context("--today")?),
        None => Ok(SystemClock.today()),
    }
}

fn format_result(key: &str, result: &ForecastResult) -> String {
    let mut line = format!(
        "{key}  {}  risk {}d ({})  delay {}d",
        result.simulated_date, result.risk_days, result.risk_level, result.delay_days
    );
    for (flag, label) in [
        (result.is_overdue, "overdue"),
        (result.is_sick, "sick"),
        (result.is_shocked, "shocked"),
    ] {
        if flag {
            line.push_str(&format!("  [{label}]"));
        }
    }
    line
}

fn portfolio_json(forecast: &PortfolioForecast) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = forecast
        .entries
        .iter()
        .map(|entry| match &entry.outcome {
            Ok(result) => json!({ "key": entry.key, "forecast": result }),
            Err(e) => json!({ "key": entry.key, "error": e.to_string() }),
        })
        .collect();

    json!({
        "entries": entries,
        "summary": forecast.summary,
        "advice": forecast.summary.advice(),
    })
}

fn write_portfolio_text(forecast: &PortfolioForecast, out: &mut impl Write) -> anyhow::Result<()> {
    for entry in &forecast.entries {
        match &entry.outcome {
            Ok(result) => writeln!(out, "{}", format_result(&entry.key, result))?,
            Err(e) => writeln!(out, "{}  skipped: {e}", entry.key)?,
        }
    }

    let summary = &forecast.summary;
    let advice = summary.advice();
    writeln!(out)?;
    writeln!(out, "Portfolio Summary")?;
    writeln!(out, "=================")?;
    writeln!(
        out,
        "Items: {} forecast, {} skipped",
        summary.forecast_count, summary.skipped_count
    )?;
    writeln!(
        out,
        "Tiers: {} low, {} medium, {} high",
        summary.low_count, summary.medium_count, summary.high_count
    )?;
    writeln!(
        out,
        "Events: {} overdue, {} sick, {} shocked",
        summary.overdue_count, summary.sick_count, summary.shocked_count
    )?;
    writeln!(
        out,
        "Risk days: {} total, {:.1} mean; max delay {}d",
        summary.total_risk_days, summary.mean_risk_days, summary.max_delay_days
    )?;
    if let Some(latest) = summary.latest_date {
        writeln!(out, "Latest completion: {latest}")?;
    }
    writeln!(
        out,
        "Portfolio risk: {} (score {})",
        summary.risk_level, summary.risk_score
    )?;
    writeln!(out, "{}: {}", advice.headline, advice.recommendation)?;
    Ok(())
}
