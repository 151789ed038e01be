//! Label and run command implementation

use super::common::{run_step, SymbolArgs};
use crate::config::Config;
use crate::pipeline::Step;
use clap::Args;

#[derive(Args, Debug)]
pub struct LabelArgs {
    #[command(flatten)]
    pub symbols: SymbolArgs,

    /// Profit-take and stop-loss multiples, e.g. 1,1
    #[arg(long, value_delimiter = ',', num_args = 2)]
    pub pt_sl: Option<Vec<f64>>,

    /// Minimum target volatility for an event to qualify
    #[arg(long)]
    pub min_ret: Option<f64>,

    /// EWM span of the volatility estimate
    #[arg(long)]
    pub span: Option<usize>,

    /// Vertical barrier in minutes after each event
    #[arg(long)]
    pub horizon_minutes: Option<i64>,

    /// Time-decay factor of the oldest event; 1 disables decay
    #[arg(long)]
    pub decay: Option<f64>,

    /// CUSUM threshold, used by `run`
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl LabelArgs {
    /// Config with command line overrides applied
    pub fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        let labeling = &mut config.labeling;

        if let Some([pt, sl]) = self.pt_sl.as_deref() {
            labeling.profit_multiple = *pt;
            labeling.loss_multiple = *sl;
        }
        if let Some(min_ret) = self.min_ret {
            labeling.min_return = min_ret;
        }
        if let Some(span) = self.span {
            labeling.volatility_span = span;
        }
        if self.horizon_minutes.is_some() {
            labeling.vertical_barrier_minutes = self.horizon_minutes;
        }
        if let Some(decay) = self.decay {
            config.weighting.oldest_weight = decay;
        }
        if let Some(threshold) = self.threshold {
            config.cusum.threshold = threshold;
        }
        config
    }

    pub async fn execute(&self, config: &Config, step: Step) -> anyhow::Result<()> {
        run_step(&self.apply(config), &self.symbols, step).await?;
        Ok(())
    }
}
