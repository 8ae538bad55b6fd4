pub mod arrival;
pub mod departure;
pub mod end_of_sim;
