use plotters::prelude::*;
use std::fs;
use crate::errors::PricingResult;
use crate::pricer::PricingStrategyTrait;
use crate::pricer_bisection::{PricerBisection, EXPLORATION_BUDGET_DEFAULT};
use crate::pricer_optimal::{revenue_curve, PricerDistributionOptimal};
use crate::scenarios::beta_known::REFERENCE_FAMILIES;
use crate::value_distributions::ValueDistribution;

const NUM_POINTS: usize = 1000;
const TRACE_VALUE: f64 = 0.7;
const TRACE_ROUNDS: usize = 64;

/// Generate revenue curves for the reference Beta families and a bisection trace
pub fn generate_all_charts() -> Result<(), Box<dyn std::error::Error>> {
    // Create charts directory if it doesn't exist
    fs::create_dir_all("charts")?;

    for &(alpha, beta, _) in REFERENCE_FAMILIES.iter() {
        generate_revenue_curve_chart(alpha, beta)?;
    }
    generate_bisection_trace_chart()?;

    Ok(())
}

/// Plot R(p) = p * (1 - F(p)) on [0, 1] with the optimal price marked
fn generate_revenue_curve_chart(alpha: f64, beta: f64) -> Result<(), Box<dyn std::error::Error>> {
    let distribution_type = ValueDistribution::BETA { alpha, beta };
    let distribution = distribution_type.build()?;
    let pricer = PricerDistributionOptimal::new(1, &distribution_type)?;
    let p_star = pricer.optimal_price();
    let r_star = pricer.expected_revenue();

    let points: Vec<(f64, f64)> = (0..NUM_POINTS)
        .map(|i| {
            let p = i as f64 / (NUM_POINTS as f64 - 1.0);
            Ok((p, revenue_curve(distribution.as_ref(), p)?))
        })
        .collect::<PricingResult<_>>()?;
    let y_max = points.iter().map(|(_, r)| *r).fold(0.0, f64::max).max(r_star) * 1.1;

    let filepath = format!("charts/revenue_curve_beta_{}_{}.png", alpha, beta);
    let root = BitMapBackend::new(&filepath, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Expected revenue per round, Beta({}, {})", alpha, beta), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, 0.0..y_max)?;

    chart.configure_mesh()
        .x_desc("Price")
        .y_desc("p * (1 - F(p))")
        .draw()?;

    chart.draw_series(LineSeries::new(points, &BLUE))?
        .label("R(p)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart.draw_series(LineSeries::new(
        vec![(p_star, 0.0), (p_star, y_max)],
        &BLACK.mix(0.3),
    ))?
    .label(format!("p* = {:.4}", p_star))
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK.mix(0.3)));

    chart.draw_series(std::iter::once(Circle::new((p_star, r_star), 5, RED.filled())))?;

    chart.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("Generated: {}", filepath);
    Ok(())
}

/// Per-round bisection state against a single fixed customer value
struct BisectionTrace {
    offers: Vec<(f64, f64)>,
    lowers: Vec<(f64, f64)>,
    uppers: Vec<(f64, f64)>,
    /// First round posted at the frozen price
    freeze_round: Option<usize>,
    exploration_budget: usize,
}

fn trace_bisection(value: f64, rounds: usize, exploration_budget: usize) -> BisectionTrace {
    let mut pricer = PricerBisection::new(rounds, exploration_budget);
    let mut trace = BisectionTrace {
        offers: Vec::with_capacity(rounds),
        lowers: Vec::with_capacity(rounds),
        uppers: Vec::with_capacity(rounds),
        freeze_round: None,
        exploration_budget: pricer.exploration_budget(),
    };

    for round in 0..rounds {
        if pricer.is_frozen() && trace.freeze_round.is_none() {
            trace.freeze_round = Some(round);
        }
        trace.offers.push((round as f64, pricer.offer()));
        trace.lowers.push((round as f64, pricer.lower()));
        trace.uppers.push((round as f64, pricer.upper()));
        let price = pricer.price_at(round);
        pricer.update(round, value >= price);
    }
    trace
}

/// Plot the bisection interval and posted price against a customer whose value is always 0.7
fn generate_bisection_trace_chart() -> Result<(), Box<dyn std::error::Error>> {
    let trace = trace_bisection(TRACE_VALUE, TRACE_ROUNDS, EXPLORATION_BUDGET_DEFAULT);
    let freeze_x = trace.freeze_round.unwrap_or(trace.exploration_budget) as f64;

    let filepath = "charts/bisection_trace.png";
    let root = BitMapBackend::new(&filepath, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Bisection pricer, customer value {}", TRACE_VALUE), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..TRACE_ROUNDS as f64, 0.0..1.0)?;

    chart.configure_mesh()
        .x_desc("Round")
        .y_desc("Price")
        .draw()?;

    chart.draw_series(LineSeries::new(trace.uppers, &GREEN))?
        .label("upper")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));
    chart.draw_series(LineSeries::new(trace.lowers, &RED))?
        .label("lower")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart.draw_series(LineSeries::new(trace.offers, &BLUE))?
        .label("posted price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart.draw_series(LineSeries::new(
        vec![(freeze_x, 0.0), (freeze_x, 1.0)],
        &BLACK.mix(0.3),
    ))?
    .label(format!("frozen after {} updates", trace.exploration_budget))
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK.mix(0.3)));

    chart.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    println!("Generated: {}", filepath);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_freezes_at_budget() {
        let trace = trace_bisection(TRACE_VALUE, TRACE_ROUNDS, EXPLORATION_BUDGET_DEFAULT);
        assert_eq!(trace.exploration_budget, EXPLORATION_BUDGET_DEFAULT);
        assert_eq!(trace.freeze_round, Some(EXPLORATION_BUDGET_DEFAULT));
        assert_eq!(trace.offers.len(), TRACE_ROUNDS);
        assert_eq!(trace.offers[0], (0.0, 0.5));
        let (_, frozen) = trace.offers[TRACE_ROUNDS - 1];
        assert!(frozen <= TRACE_VALUE && TRACE_VALUE - frozen < 1e-6);
    }

    #[test]
    fn test_trace_without_freeze() {
        let trace = trace_bisection(0.3, 10, EXPLORATION_BUDGET_DEFAULT);
        assert_eq!(trace.freeze_round, None);
        assert!(trace.lowers.iter().zip(&trace.uppers).all(|((_, l), (_, u))| l <= u));
    }
}
