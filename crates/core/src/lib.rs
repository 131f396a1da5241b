pub mod config;
pub mod domain;
pub mod errors;

pub use domain::amount::Amount;
pub use domain::filter::MessageFilter;
pub use domain::message::Message;
pub use domain::stats::Stats;
pub use errors::DomainError;
