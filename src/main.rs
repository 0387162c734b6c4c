mod logger;
mod utils;
mod errors;
mod special_functions;
mod value_distributions;
mod optimize;
mod pricer;
mod pricer_bisection;
mod pricer_optimal;
mod pricers;
mod timing;
mod customers;
mod config;
mod simulationrun;
mod simulation;
mod scenarios;
mod charts;

use logger::{Logger, LogEvent, ConsoleReceiver, FileReceiver, LogReceiver, sanitize_filename};
use std::path::PathBuf;

use scenarios::get_scenario_catalog;
use utils::{RAND_SEED, TOTAL_TRIALS};
use std::sync::atomic::Ordering;

const DEFAULT_SCENARIO: &str = "learn_vs_know";

/// Open a file receiver or stop with a readable message
fn open_file_receiver(path: &str, events: Vec<LogEvent>) -> Box<dyn LogReceiver> {
    match FileReceiver::new(&PathBuf::from(path), events) {
        Ok(receiver) => receiver,
        Err(e) => {
            eprintln!("Error: Cannot open log file '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

fn parse_count(args: &[String], index: usize, name: &str, default: u64) -> u64 {
    match args.get(index) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: Invalid {} parameter '{}'. Expected a number.", name, arg);
                std::process::exit(1);
            }
        },
        None => default,
    }
}

fn main() {
    let raw_args: Vec<String> = std::env::args().collect();

    // Parse and filter out --verbose and --fastbreak arguments
    let mut args = Vec::new();
    let mut skip_next = false;
    let mut fastbreak = false;
    for (i, arg) in raw_args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--verbose" {
            if i + 1 < raw_args.len() && raw_args[i + 1] == "rounds" {
                utils::VERBOSE_ROUNDS.store(true, Ordering::Relaxed);
                skip_next = true;
            }
            continue;
        }
        if arg == "--fastbreak" {
            fastbreak = true;
            continue;
        }
        args.push(arg.clone());
    }

    if args.len() > 1 && args[1] == "charts" {
        match charts::generate_all_charts() {
            Ok(()) => {
                println!("All chart generation completed successfully.");
            }
            Err(e) => {
                eprintln!("Error generating charts: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if args.len() > 1 && args[1] == "list" {
        for s in get_scenario_catalog() {
            println!("{:<16} {}", s.short_name, s.description);
        }
        return;
    }

    if args.len() > 1 {
        let scenario_arg = &args[1];
        let iterations = parse_count(&args, 2, "iterations", 1);
        let start_iteration = parse_count(&args, 3, "start iteration", 0);

        let all_scenarios = get_scenario_catalog();

        // "all" runs the whole catalog, anything else must name one scenario
        let scenarios: Vec<_> = if scenario_arg == "all" {
            all_scenarios.clone()
        } else {
            match all_scenarios.iter().find(|s| s.short_name == scenario_arg) {
                Some(scenario) => vec![scenario.clone()],
                None => {
                    eprintln!("Error: Scenario '{}' not found.", scenario_arg);
                    eprintln!("Available scenarios:");
                    for s in &all_scenarios {
                        eprintln!("  - {}", s.short_name);
                    }
                    std::process::exit(1);
                }
            }
        };

        // Individual validations go to the console only for a single scenario run once
        let mut logger = Logger::new();
        if scenario_arg != "all" && iterations == 1 {
            logger.add_receiver(ConsoleReceiver::new(vec![LogEvent::Validation, LogEvent::Scenario]));
        } else {
            logger.add_receiver(ConsoleReceiver::new(vec![LogEvent::Validation]));
        }

        let summary_receiver_id = logger.add_receiver(open_file_receiver("log/summary.log", vec![LogEvent::Validation]));

        TOTAL_TRIALS.store(0, Ordering::Relaxed);

        let target = if scenario_arg == "all" { "all scenarios".to_string() } else { format!("scenario '{}'", scenario_arg) };
        if iterations > 1 {
            logln!(&mut logger, LogEvent::Validation, "Running {} {} times...\n", target, iterations);
        } else {
            logln!(&mut logger, LogEvent::Validation, "Running {}...\n", target);
        }

        let mut failed = false;
        'scenarios: for scenario in &scenarios {
            log!(&mut logger, LogEvent::Validation, "{}: ", scenario.short_name);

            let scenario_log = format!("log/{}/scenario.log", sanitize_filename(scenario.short_name));
            let scenario_receiver_id = logger.add_receiver(open_file_receiver(&scenario_log, vec![LogEvent::Scenario]));

            for i in start_iteration..(start_iteration + iterations) {
                if iterations > 1 {
                    log!(&mut logger, LogEvent::Validation, "[{}/{}] ", i - start_iteration + 1, iterations);
                }

                // Each iteration is a different seed
                RAND_SEED.store(i, Ordering::Relaxed);

                match (scenario.run)(scenario.short_name, &mut logger) {
                    Ok(()) => {
                        if iterations > 1 {
                            logln!(&mut logger, LogEvent::Validation, "✓");
                        } else {
                            logln!(&mut logger, LogEvent::Validation, "✓ PASSED");
                        }
                    }
                    Err(e) => {
                        failed = true;
                        if iterations > 1 {
                            logln!(&mut logger, LogEvent::Validation, "✗");
                        } else {
                            logln!(&mut logger, LogEvent::Validation, "✗ FAILED: {}", e);
                        }

                        if fastbreak {
                            logger.remove_receiver(scenario_receiver_id);
                            logln!(&mut logger, LogEvent::Validation, "\nStopping scenario execution due to failure (--fastbreak enabled)");
                            if iterations > 1 {
                                logln!(&mut logger, LogEvent::Validation, "Error at iteration {}/{} (seed {}): {}", i - start_iteration + 1, iterations, i, e);
                            } else {
                                logln!(&mut logger, LogEvent::Validation, "Error: {}", e);
                            }
                            break 'scenarios;
                        }
                    }
                }

                let _ = logger.flush();
            }

            logger.remove_receiver(scenario_receiver_id);
        }

        logln!(&mut logger, LogEvent::Validation, "\nTotal trials completed: {}", TOTAL_TRIALS.load(Ordering::Relaxed));
        let _ = logger.flush();
        logger.remove_receiver(summary_receiver_id);

        if failed {
            std::process::exit(1);
        }
    } else {
        let mut logger = Logger::new();
        logger.add_receiver(ConsoleReceiver::new(vec![LogEvent::Scenario, LogEvent::Variant]));
        if let Err(e) = scenarios::learn_vs_know::run(DEFAULT_SCENARIO, &mut logger) {
            eprintln!("Error running scenario: {}", e);
            std::process::exit(1);
        }
    }
}
