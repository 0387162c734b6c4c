/// Contract shared by every posted-price strategy
///
/// The driver asks for a price each round, shows it to one customer, and reports
/// back only whether the customer bought. Strategies never see customer values.
pub trait PricingStrategyTrait {
    /// Price offered in the given round, always within [0, 1]
    fn price_at(&self, round: usize) -> f64;

    /// Incorporate the sale outcome of the given round
    fn update(&mut self, round: usize, sold: bool);

    /// Short description of the strategy and its current state for logging
    fn pricer_string(&self) -> String;
}
