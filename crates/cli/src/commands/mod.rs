mod expunge;
mod monitor;
mod resolve;

pub use expunge::expunge;
pub use monitor::monitor;
pub use resolve::resolve;
