use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use contract_capacity::{
    advice::SPIKE_RATIO,
    prelude::*,
    quantity::power::Kilowatts,
    fee::FeeModel,
    tariff::Tariff,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// TOML file overriding the built-in tariff, see the `tariff` command for the format.
    #[clap(long = "tariff", env = "TARIFF_PATH")]
    pub tariff_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    #[instrument(skip_all)]
    pub fn load_fee_model(&self) -> Result<FeeModel> {
        let Some(path) = &self.tariff_path else {
            return Ok(FeeModel::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let tariff = Tariff::from_toml(&text)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        let fee_model = FeeModel::new(tariff)
            .with_context(|| format!("invalid tariff in `{}`", path.display()))?;
        info!(path = %path.display(), "loaded the tariff");
        Ok(fee_model)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Break down the annual base fee of a contracted capacity by month.
    #[clap(name = "fee")]
    Fee(ContractArgs),

    /// Find the cheapest contracted capacity and compare it with the current one.
    #[clap(name = "optimize")]
    Optimize(Box<OptimizeArgs>),

    /// Print the effective tariff as TOML.
    #[clap(name = "tariff")]
    Tariff,
}

#[derive(Parser)]
pub struct ContractArgs {
    /// Current contracted capacity in kilowatts.
    #[clap(long = "capacity-kilowatts", alias = "capacity", env = "CAPACITY_KILOWATTS")]
    pub capacity: Kilowatts,

    /// Monthly peak demands in kilowatts, January through December.
    #[clap(
        long = "demands-kilowatts",
        alias = "demands",
        env = "DEMANDS_KILOWATTS",
        value_delimiter = ',',
        num_args = 1..,
        required = true,
    )]
    pub demands: Vec<Kilowatts>,
}

#[derive(Parser)]
pub struct OptimizeArgs {
    #[clap(flatten)]
    pub contract: ContractArgs,

    /// Print the assessment as JSON instead of tables.
    #[clap(long)]
    pub json: bool,

    /// Warn about months whose demand exceeds the capacity this many times.
    #[clap(long, default_value_t = SPIKE_RATIO, env = "SPIKE_RATIO")]
    pub spike_ratio: f64,

    /// Accept readings above 10 000 kW.
    #[clap(long)]
    pub allow_implausible: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_verify_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_optimize() {
        let args = Args::try_parse_from([
            "contract-capacity",
            "optimize",
            "--capacity",
            "25",
            "--demands",
            "20,20,20,20,20,30,30,30,30,20,20,20.5",
        ])
        .unwrap();
        let Command::Optimize(args) = args.command else {
            panic!("expected the `optimize` command");
        };
        assert_eq!(args.contract.capacity, Kilowatts::from(25));
        assert_eq!(args.contract.demands.len(), 12);
        assert_eq!(args.contract.demands[11], Kilowatts::from(20.5));
        assert!(!args.json);
        assert_eq!(args.spike_ratio, SPIKE_RATIO);
    }

    #[test]
    fn test_default_tariff() {
        let args = Args::try_parse_from(["contract-capacity", "tariff"]).unwrap();
        assert_eq!(args.load_fee_model().unwrap().tariff(), &Tariff::default());
    }
}
