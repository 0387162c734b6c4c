use std::error::Error;
use crate::logger::{Logger, LogEvent};
use crate::{errln, logln};

/// Function type for scenario entry functions
pub type ScenarioFn = fn(scenario_name: &str, logger: &mut Logger) -> Result<(), Box<dyn Error>>;

/// Entry in the scenario catalog
#[derive(Clone)]
pub struct ScenarioEntry {
    pub short_name: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

// Create an inventory collection for scenario entries
inventory::collect!(ScenarioEntry);

/// Get all registered scenarios from the catalog, sorted by name
pub fn get_scenario_catalog() -> Vec<ScenarioEntry> {
    let mut entries: Vec<ScenarioEntry> = inventory::iter::<ScenarioEntry>
        .into_iter()
        .cloned()
        .collect();
    entries.sort_by_key(|entry| entry.short_name);
    entries
}

/// Log one validation line and remember the message if it failed
pub fn validate(passed: bool, msg: String, errors: &mut Vec<String>, logger: &mut Logger) {
    if passed {
        logln!(logger, LogEvent::Scenario, "✓ {}", msg);
    } else {
        errln!(logger, LogEvent::Scenario, "✗ {}", msg);
        errors.push(msg);
    }
}

/// Turn collected validation failures into the scenario result
pub fn finish(scenario_name: &str, errors: Vec<String>) -> Result<(), Box<dyn Error>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("Scenario '{}' validation failed:\n{}", scenario_name, errors.join("\n")).into())
    }
}

// Scenario modules
pub mod fixed_value;
pub mod deterministic;
pub mod beta_known;
pub mod learn_vs_know;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryReceiver;

    #[test]
    fn test_catalog_contains_all_scenarios() {
        let names: Vec<&str> = get_scenario_catalog().iter().map(|s| s.short_name).collect();
        assert_eq!(names, vec!["beta_known", "deterministic", "fixed_value", "learn_vs_know"]);
    }

    #[test]
    fn test_validate_collects_failures() {
        let mut logger = Logger::new();
        let (receiver, buffer) = MemoryReceiver::new(vec![LogEvent::Scenario]);
        logger.add_receiver(receiver);
        let mut errors = Vec::new();
        validate(true, "fine".to_string(), &mut errors, &mut logger);
        validate(false, "broken".to_string(), &mut errors, &mut logger);
        assert_eq!(errors, vec!["broken".to_string()]);
        assert!(buffer.borrow().contains("ERROR ✗ broken"));
        assert!(finish("demo", errors).is_err());
        assert!(finish("demo", Vec::new()).is_ok());
    }
}
