//! The engine: indicator bank, position state machine, per-bar pipeline,
//! and session replay.

pub mod bank;
pub mod machine;
pub mod replay;
pub mod strategy;

pub use bank::IndicatorBank;
pub use machine::{PositionMachine, PositionTransition};
pub use replay::{replay, ReplayReport, SessionRow};
pub use strategy::{BarOutput, StrategyEngine};
