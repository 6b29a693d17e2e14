mod barrier;
mod gather;
mod helpers;

pub use barrier::barrier;
pub use gather::gather;
