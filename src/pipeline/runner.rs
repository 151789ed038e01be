//! Single-symbol pipeline: filter, label, weight, persist

use super::types::{LabelError, Step, SymbolReport, SymbolStatus};
use crate::config::Config;
use crate::data::{self, DataLayout};
use crate::filter::{CusumEvent, CusumFilter};
use crate::labeling::{
    define_events, generate_labels, resolve_barriers, vertical_barriers, BarrierParams,
    DroppedEvent, Event, EventId, LabeledOutcome,
};
use crate::model::VolatilityEstimator;
use crate::series::PriceSeries;
use crate::telemetry::{self, CounterMetric};
use crate::weights::{compute_weights, EventWeight, WeightOptions};
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Parameters of one labeling run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelParams {
    /// CUSUM trigger threshold in log-return units
    pub threshold: f64,
    pub barrier: BarrierParams,
    pub volatility_span: usize,
    /// Maximum holding period; `None` holds until the end of the series
    pub horizon: Option<Duration>,
    pub weights: WeightOptions,
}

impl LabelParams {
    pub fn from_config(config: &Config) -> Self {
        let labeling = &config.labeling;
        Self {
            threshold: config.cusum.threshold,
            barrier: BarrierParams {
                profit_multiple: labeling.profit_multiple,
                loss_multiple: labeling.loss_multiple,
                min_return: labeling.min_return,
            },
            volatility_span: labeling.volatility_span,
            horizon: labeling.vertical_barrier_minutes.and_then(Duration::try_minutes),
            weights: WeightOptions {
                oldest_weight: config.weighting.oldest_weight,
            },
        }
    }
}

impl Default for LabelParams {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything one labeling pass produces
#[derive(Debug, Clone, Default)]
pub struct Labeling {
    /// Qualified events, resolved where the series allowed
    pub events: Vec<Event>,
    pub dropped: Vec<DroppedEvent>,
    pub weights: Vec<EventWeight>,
    /// One row per resolved event, in start order
    pub outcomes: Vec<LabeledOutcome>,
}

/// Detect CUSUM events on a series
pub fn filter_series(series: &PriceSeries, threshold: f64) -> Result<Vec<CusumEvent>, LabelError> {
    let filter = CusumFilter::new(threshold)?;
    Ok(filter.detect(series))
}

/// Label and weight `event_times` against `series`
///
/// Fails with [`LabelError::InsufficientData`] when the series has fewer
/// than two bars.
pub fn label_series(
    series: &PriceSeries,
    event_times: &[NaiveDateTime],
    params: &LabelParams,
) -> Result<Labeling, LabelError> {
    if series.len() < 2 {
        return Err(LabelError::InsufficientData { bars: series.len() });
    }

    let volatility = VolatilityEstimator::new(params.volatility_span)?.estimate(series);
    let deadlines = params
        .horizon
        .map(|horizon| vertical_barriers(series, event_times, horizon));

    let setup = define_events(
        series,
        event_times,
        &volatility,
        &params.barrier,
        deadlines.as_ref(),
        None,
    );
    let mut events = setup.events;
    resolve_barriers(&mut events, series);

    let bins = generate_labels(&events, series);
    let weights = compute_weights(&events, series, &params.weights);
    let by_id: HashMap<EventId, f64> = weights.iter().map(|w| (w.id, w.weight)).collect();

    let mut outcomes: Vec<LabeledOutcome> = bins
        .iter()
        .map(|bin| LabeledOutcome::new(bin, by_id.get(&bin.id).copied().unwrap_or(0.0)))
        .collect();
    outcomes.sort_by_key(|o| o.start);

    Ok(Labeling {
        events,
        dropped: setup.dropped,
        weights,
        outcomes,
    })
}

/// Runs pipeline steps for symbols of one data layout
#[derive(Debug, Clone)]
pub struct Pipeline {
    layout: DataLayout,
    params: LabelParams,
}

impl Pipeline {
    pub fn new(layout: DataLayout, params: LabelParams) -> Self {
        Self { layout, params }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(DataLayout::new(&config.data), LabelParams::from_config(config))
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn params(&self) -> &LabelParams {
        &self.params
    }

    /// Run `step` for `symbol`, timing the whole run
    pub fn execute(&self, symbol: &str, step: Step) -> Result<SymbolReport, LabelError> {
        let started = Instant::now();
        let result = match step {
            Step::Filter => self.filter_symbol(symbol),
            Step::Label => self.label_symbol(symbol),
            Step::Run => self.run_symbol(symbol),
        };
        telemetry::record_symbol_duration(started.elapsed());
        result
    }

    /// Detect events on the raw bars and write the filtered events file
    pub fn filter_symbol(&self, symbol: &str) -> Result<SymbolReport, LabelError> {
        let series = self.load_series(symbol)?;
        let mut report = SymbolReport::new(symbol);
        report.bars = series.len();

        let events = self.write_events(symbol, &series)?;
        report.events = events.len();
        report.status = status_of(events.len());
        report.output = Some(self.layout.filtered_path(symbol));
        Ok(report)
    }

    /// Label the events of an existing filtered events file
    pub fn label_symbol(&self, symbol: &str) -> Result<SymbolReport, LabelError> {
        let series = self.load_series(symbol)?;
        let filtered = self.layout.filtered_path(symbol);
        let event_times = require(symbol, &filtered)
            .and_then(|_| data::read_event_times(&filtered).map_err(LabelError::from))?;

        let mut report = SymbolReport::new(symbol);
        report.bars = series.len();
        report.events = event_times.len();
        self.label_and_write(symbol, &series, &event_times, report)
    }

    /// Filter and label in one pass; both files are written
    pub fn run_symbol(&self, symbol: &str) -> Result<SymbolReport, LabelError> {
        let series = self.load_series(symbol)?;
        let events = self.write_events(symbol, &series)?;
        let event_times: Vec<NaiveDateTime> = events.iter().map(|e| e.time).collect();

        let mut report = SymbolReport::new(symbol);
        report.bars = series.len();
        report.events = event_times.len();
        self.label_and_write(symbol, &series, &event_times, report)
    }

    fn load_series(&self, symbol: &str) -> Result<PriceSeries, LabelError> {
        let path = self.layout.raw_path(symbol);
        require(symbol, &path)?;
        Ok(data::read_price_series(&path)?)
    }

    fn write_events(&self, symbol: &str, series: &PriceSeries) -> Result<Vec<CusumEvent>, LabelError> {
        let events = filter_series(series, self.params.threshold)?;
        let path = self.layout.filtered_path(symbol);
        data::write_filtered(&path, series, &events)?;

        telemetry::increment(CounterMetric::EventsDetected, events.len() as u64);
        info!(symbol, events = events.len(), path = %path.display(), "Saved filtered events");
        Ok(events)
    }

    fn label_and_write(
        &self,
        symbol: &str,
        series: &PriceSeries,
        event_times: &[NaiveDateTime],
        mut report: SymbolReport,
    ) -> Result<SymbolReport, LabelError> {
        let labeling = match label_series(series, event_times, &self.params) {
            Ok(labeling) => labeling,
            Err(LabelError::InsufficientData { bars }) => {
                info!(symbol, bars, "Too few bars to label");
                Labeling::default()
            }
            Err(e) => return Err(e),
        };

        for dropped in &labeling.dropped {
            *report
                .dropped
                .entry(dropped.reason.as_str().to_string())
                .or_default() += 1;
            telemetry::increment(CounterMetric::EventsDropped(dropped.reason), 1);
        }
        for exit in labeling.events.iter().filter_map(|e| e.exit) {
            telemetry::increment(CounterMetric::BarrierOutcome(exit.touch), 1);
            if exit.tie {
                report.ties += 1;
            }
        }
        let unresolved = labeling.events.iter().filter(|e| !e.is_resolved()).count();
        if unresolved > 0 {
            warn!(symbol, unresolved, "Events left without an exit");
        }

        let path = self.layout.labeled_path(symbol);
        let written = data::write_labels(&path, &labeling.outcomes)?;
        telemetry::increment(CounterMetric::LabelsWritten, written as u64);

        for outcome in &labeling.outcomes {
            match outcome.label {
                1 => report.positive += 1,
                -1 => report.negative += 1,
                _ => report.neutral += 1,
            }
        }
        report.labels = written;
        report.status = status_of(written);
        report.output = Some(path.clone());

        info!(
            symbol,
            labels = written,
            dropped = report.dropped_total(),
            path = %path.display(),
            "Saved labeled data"
        );
        Ok(report)
    }
}

fn status_of(rows: usize) -> SymbolStatus {
    if rows == 0 {
        SymbolStatus::Empty
    } else {
        SymbolStatus::Written
    }
}

fn require(symbol: &str, path: &Path) -> Result<(), LabelError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LabelError::MissingInput {
            symbol: symbol.to_string(),
            path: path.to_path_buf(),
        })
    }
}
