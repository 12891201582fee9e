pub mod payment;
pub mod quote;
pub mod schedule;
