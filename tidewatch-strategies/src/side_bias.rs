pub use tidewatch_core::strategy::SideBias;
use tidewatch_core::core::types::Side;

pub fn bias_allows(bias: SideBias, side: Side) -> bool {
    match bias {
        SideBias::Both => true,
        SideBias::LongOnly => side == Side::Buy,
        SideBias::ShortOnly => side == Side::Sell,
    }
}
