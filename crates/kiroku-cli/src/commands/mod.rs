pub mod chain;
pub mod dispatch;
pub mod resolve;
pub mod sync;
