use rand::rngs::StdRng;
use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use crate::config::SimulationConfig;
use crate::customers::CustomerGenerator;
use crate::errors::PricingResult;
use crate::logger::{Logger, LogEvent, FileReceiver, sanitize_filename};
use crate::pricers::PricerType;
use crate::simulationrun::{TrialRun, TrialStat};
use crate::utils::{mean_and_stddev, TOTAL_TRIALS, VERBOSE_ROUNDS};
use crate::{errln, logln, warnln};

/// Aggregated statistics over all trials of one simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStat {
    pub num_trials: usize,
    pub mean_revenue: f64,
    pub stddev_revenue: f64,
    pub min_revenue: f64,
    pub max_revenue: f64,
    pub mean_sales: f64,
    pub mean_final_price: f64,
    pub mean_efficiency: f64,
}

impl SimulationStat {
    pub fn new(trial_stats: &[TrialStat]) -> Self {
        let revenues: Vec<f64> = trial_stats.iter().map(|s| s.revenue).collect();
        let (mean_revenue, stddev_revenue) = mean_and_stddev(&revenues);
        Self {
            num_trials: trial_stats.len(),
            mean_revenue,
            stddev_revenue,
            min_revenue: if revenues.is_empty() { 0.0 } else { revenues.iter().cloned().fold(f64::INFINITY, f64::min) },
            max_revenue: if revenues.is_empty() { 0.0 } else { revenues.iter().cloned().fold(f64::NEG_INFINITY, f64::max) },
            mean_sales: mean_of(trial_stats, |s| s.sales as f64),
            mean_final_price: mean_of(trial_stats, |s| s.final_price),
            mean_efficiency: mean_of(trial_stats, |s| s.efficiency()),
        }
    }

    /// Output the aggregated statistics
    pub fn printout(&self, logger: &mut Logger) {
        logln!(logger, LogEvent::Variant, "\n=== Simulation Statistics ===");
        logln!(logger, LogEvent::Variant, "  Trials: {}", self.num_trials);
        logln!(logger, LogEvent::Variant, "  Revenue (mean/stddev): {:.4} / {:.4}", self.mean_revenue, self.stddev_revenue);
        logln!(logger, LogEvent::Variant, "  Revenue (min/max): {:.4} / {:.4}", self.min_revenue, self.max_revenue);
        logln!(logger, LogEvent::Variant, "  Mean Sales: {:.2}", self.mean_sales);
        logln!(logger, LogEvent::Variant, "  Mean Final Price: {:.6}", self.mean_final_price);
        logln!(logger, LogEvent::Variant, "  Mean Efficiency: {:.4}", self.mean_efficiency);
    }
}

fn mean_of(trial_stats: &[TrialStat], f: impl Fn(&TrialStat) -> f64) -> f64 {
    let values: Vec<f64> = trial_stats.iter().map(f).collect();
    mean_and_stddev(&values).0
}

/// Repeated independent trials of one pricer setup against one customer model
pub struct Simulation {
    pub pricer_type: PricerType,
    pub customers: CustomerGenerator,
    pub config: SimulationConfig,
}

impl Simulation {
    pub fn new(pricer_type: PricerType, customers: CustomerGenerator, config: SimulationConfig) -> Self {
        Self { pricer_type, customers, config }
    }

    pub fn printout(&self, logger: &mut Logger) {
        logln!(logger, LogEvent::Variant, "Pricer: {}", self.pricer_type.type_string());
        logln!(logger, LogEvent::Variant, "Customers: {}", self.customers.generator_string());
        logln!(logger, LogEvent::Variant, "Trials x rounds: {} x {}", self.config.num_trials, self.config.rounds);
    }

    /// Run all trials; the first failing trial aborts the whole simulation
    pub fn run(&self, rng: &mut StdRng, logger: &mut Logger) -> PricingResult<SimulationStat> {
        if self.config.num_trials == 0 || self.config.rounds == 0 {
            warnln!(logger, LogEvent::Variant, "Empty simulation ({} trials x {} rounds), all statistics are zero",
                self.config.num_trials, self.config.rounds);
        }
        let mut trial_stats = Vec::with_capacity(self.config.num_trials);

        for trial_index in 0..self.config.num_trials {
            let trial_run = TrialRun::run(&self.pricer_type, &self.customers, &self.config, trial_index, rng, logger)?;
            let trial_stat = TrialStat::new(&trial_run);
            if logger.is_enabled(LogEvent::Trial) {
                trial_stat.printout(trial_index, logger);
                logln!(logger, LogEvent::Trial, "  {}", trial_run.final_pricer_string);
            }
            TOTAL_TRIALS.fetch_add(1, Ordering::Relaxed);
            trial_stats.push(trial_stat);
        }

        Ok(SimulationStat::new(&trial_stats))
    }

    /// Run the simulation with per-variant log files attached
    ///
    /// # Arguments
    /// * `variant_description` - Description of the variant being run
    /// * `scenario_name` - Name of the scenario (for log file paths)
    /// * `variant_name` - Name of the variant (for log file paths)
    /// * `rng` - Random stream for customer values
    /// * `logger` - Logger for event-based logging
    pub fn run_variant(
        &self,
        variant_description: &str,
        scenario_name: &str,
        variant_name: &str,
        rng: &mut StdRng,
        logger: &mut Logger,
    ) -> Result<SimulationStat, Box<dyn Error>> {
        let log_dir = PathBuf::from("log").join(sanitize_filename(scenario_name));
        let variant_file = sanitize_filename(variant_name);

        let mut receiver_ids = vec![
            logger.add_receiver(FileReceiver::new(&log_dir.join(format!("trials-{}.log", variant_file)), vec![LogEvent::Trial])?),
            logger.add_receiver(FileReceiver::new(&log_dir.join(format!("variant-{}.log", variant_file)), vec![LogEvent::Variant])?),
        ];
        if VERBOSE_ROUNDS.load(Ordering::Relaxed) {
            receiver_ids.push(logger.add_receiver(FileReceiver::new(&log_dir.join(format!("rounds-{}.csv", variant_file)), vec![LogEvent::Round])?));
            logln!(logger, LogEvent::Round, "trial,round,price,customer_value,sold");
        }

        logln!(logger, LogEvent::Variant, "\n=== {} ===", variant_description);
        self.printout(logger);

        let result = self.run(rng, logger);
        match &result {
            Ok(stats) => stats.printout(logger),
            Err(e) => errln!(logger, LogEvent::Variant, "{}: {}", variant_name, e),
        }

        for id in receiver_ids {
            logger.remove_receiver(id);
        }

        Ok(result?)
    }
}
