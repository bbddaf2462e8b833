pub mod dispatcher;
pub mod help;

pub use dispatcher::{Dispatcher, Outcome};
