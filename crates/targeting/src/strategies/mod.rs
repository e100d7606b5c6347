//! Built-in targeting strategy implementations.

pub mod balanced;
pub mod direction;
pub mod distance;

pub use balanced::BalancedStrategy;
pub use direction::DirectionStrategy;
pub use distance::DistanceStrategy;
