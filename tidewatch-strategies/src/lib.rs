//! Strategy implementations against the `tidewatch_core::strategy::Strategy`
//! contract. Each module owns one strategy's config struct and state; none
//! of them see the engine, position, or risk state directly — only the
//! tick stream, per `tidewatch_core::strategy`'s module doc.

pub mod imbalance_v1;
pub mod market_maker_v1;
pub mod market_maker_v2;
pub mod mean_reversion_v1;
pub mod micro_momentum_v1;
pub mod side_bias;
pub mod simple_maker_taker;

pub use imbalance_v1::{ImbalanceV1, ImbalanceV1Config};
pub use market_maker_v1::{MarketMakerV1, MarketMakerV1Config};
pub use market_maker_v2::{MarketMakerV2, MarketMakerV2Config};
pub use mean_reversion_v1::{MeanReversionV1, MeanReversionV1Config};
pub use micro_momentum_v1::{MicroMomentumV1, MicroMomentumV1Config};
pub use simple_maker_taker::{SimpleMakerTaker, SimpleMakerTakerConfig};
