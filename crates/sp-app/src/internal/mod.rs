//! Internal helpers shared by use cases.

pub mod resettable_timer;

pub use resettable_timer::ResettableTimer;
