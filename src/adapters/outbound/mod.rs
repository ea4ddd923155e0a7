pub mod persistence;
pub mod storage;
pub mod telemetry;
