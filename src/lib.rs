pub mod commands;
pub mod modules;

pub use modules::categories;
pub use modules::cleaner;
pub use modules::common::config::SweepConfig;
pub use modules::common::error::SweepError;
pub use modules::common::utils;
pub use modules::dispatcher;
pub use modules::gauge;
pub use modules::ledger;
pub use modules::presenter;
pub use modules::runner;
pub use modules::store;
