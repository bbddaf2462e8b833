mod executable;
mod invocation;
mod runnable;

pub use executable::ProcessImage;
pub use invocation::Invocation;
pub use runnable::Runnable;
