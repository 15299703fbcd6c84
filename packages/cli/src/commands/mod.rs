pub mod init;
pub mod inspect;
pub mod session;

pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use session::{session, SessionArgs};
