//! Filter command implementation

use super::common::{run_step, SymbolArgs};
use crate::config::Config;
use crate::pipeline::Step;
use clap::Args;

#[derive(Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub symbols: SymbolArgs,

    /// CUSUM threshold in log-return units
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl FilterArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        if let Some(threshold) = self.threshold {
            config.cusum.threshold = threshold;
        }

        run_step(&config, &self.symbols, Step::Filter).await?;
        Ok(())
    }
}
