pub mod inventory;
pub mod manager;
pub mod types;

pub use inventory::{InventoryLimits, InventoryRiskManager};
pub use manager::{BreakerState, RiskManager};
pub use types::RiskLimits;
