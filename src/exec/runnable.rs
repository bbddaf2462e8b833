use super::Invocation;
use crate::errors::Result;

/// Hands a resolved invocation over to the operating system
/// On success a runner either never returns or returns the status the dispatcher should exit with
pub trait Runnable {
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}
