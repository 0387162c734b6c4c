use std::error::Error;
use std::fmt;
use std::time::Duration;

/// The strategy call a timing budget applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricerCall {
    Construction,
    PriceAt,
    Update,
}

impl fmt::Display for PricerCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricerCall::Construction => write!(f, "construction"),
            PricerCall::PriceAt => write!(f, "price_at"),
            PricerCall::Update => write!(f, "update"),
        }
    }
}

/// Everything that can stop a pricer from being built or a simulation from completing
/// None of these are retried; callers treat them as fatal for the run
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A construction parameter is outside its valid domain
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The bounded maximizer did not reach its tolerance within the iteration cap
    OptimizationNonConvergence {
        iterations: usize,
        tolerance: f64,
    },
    /// A strategy call ran longer than its wall-clock budget
    TimingViolation {
        call: PricerCall,
        elapsed: Duration,
        budget: Duration,
    },
}

pub type PricingResult<T> = Result<T, PricingError>;

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidParameter { name, value, reason } => {
                write!(f, "invalid parameter {} = {}: {}", name, value, reason)
            }
            PricingError::OptimizationNonConvergence { iterations, tolerance } => {
                write!(f, "bounded maximization did not converge to {:e} within {} iterations", tolerance, iterations)
            }
            PricingError::TimingViolation { call, elapsed, budget } => {
                write!(f, "{} took {:.4}s, budget is {:.4}s", call, elapsed.as_secs_f64(), budget.as_secs_f64())
            }
        }
    }
}

impl Error for PricingError {}
