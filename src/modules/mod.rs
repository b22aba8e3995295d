pub mod categories;
pub mod cleaner;
pub mod common;
pub mod dispatcher;
pub mod gauge;
pub mod ledger;
pub mod presenter;
pub mod runner;
pub mod state;
pub mod store;
