#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod tables;

use std::{io, ops::RangeInclusive};

use clap::{Parser, crate_version};
use contract_capacity::{
    advice::{Warning, check_plausible, review, suggested_range},
    demand::AnnualDemand,
    fee::FeeModel,
    optimizer::{Assessment, CapacityOptimizer},
    prelude::*,
};
use serde::Serialize;

use crate::{
    cli::{Args, Command, ContractArgs, OptimizeArgs},
    tables::{
        build_annual_table,
        build_assessment_table,
        build_distribution_table,
        build_monthly_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(io::stderr).without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let fee_model = args.load_fee_model()?;

    match args.command {
        Command::Fee(args) => fee(&fee_model, &args)?,
        Command::Optimize(args) => optimize(&fee_model, &args)?,
        Command::Tariff => print!("{}", fee_model.tariff().to_toml()?),
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all, fields(capacity = %args.capacity))]
fn fee(fee_model: &FeeModel, args: &ContractArgs) -> Result {
    let months = fee_model.annual_breakdown(args.capacity, &args.demands)?;
    let annual_fee = fee_model.annual_fee(args.capacity, &args.demands)?;
    let totals = fee_model.waste_and_penalty(args.capacity, &args.demands)?;
    println!("{}", build_monthly_table(args.capacity, &months));
    println!("{}", build_annual_table(args.capacity, annual_fee, totals));
    Ok(())
}

/// JSON document of the `optimize` command.
#[derive(Serialize)]
struct Report<'a> {
    warnings: &'a [Warning],
    suggested_range: RangeInclusive<u32>,

    #[serde(flatten)]
    assessment: &'a Assessment,
}

#[instrument(skip_all, fields(capacity = %args.contract.capacity))]
fn optimize(fee_model: &FeeModel, args: &OptimizeArgs) -> Result {
    let capacity = args.contract.capacity;
    let demands = AnnualDemand::try_from(args.contract.demands.as_slice())
        .context("invalid monthly demands")?;
    if !args.allow_implausible {
        check_plausible(capacity, &demands)?;
    }

    let warnings = review(capacity, &demands, args.spike_ratio);
    for warning in &warnings {
        warn!("{warning}");
    }

    let assessment = CapacityOptimizer::new(fee_model)
        .assess(capacity, &args.contract.demands)
        .context("failed to optimize the contracted capacity")?;

    if args.json {
        let report = Report {
            warnings: &warnings,
            suggested_range: suggested_range(&demands),
            assessment: &assessment,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", build_distribution_table(&assessment.optimum));
        println!("{}", build_assessment_table(&assessment));
    }
    Ok(())
}
