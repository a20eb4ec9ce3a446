pub mod store;

pub use store::{can_afford, credit_tickets, RewardCatalog};
