pub use board::*;
pub use errors::*;
pub use pieces::*;
pub use protocol::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod pieces;
mod protocol;
mod visualization;
