pub mod clock;
pub mod customers;
pub mod fleet;
pub mod pricing;
pub mod runner;
pub mod scenario;
pub mod spatial;
pub mod systems;
pub mod telemetry;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
pub mod variates;
