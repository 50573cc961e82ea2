// Application layer: the session a front end drives, and the shell commands
// that map onto it.

pub mod command;
pub mod error;
pub mod session;

pub use command::*;
pub use error::*;
pub use session::*;
