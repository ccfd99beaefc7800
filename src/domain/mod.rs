//! Domain models
//!
//! Plain value types shared by the UI and the infrastructure layer,
//! independent of the transport used to fetch them.

pub mod chain;
pub mod console;
pub mod smarthome;

pub use chain::{AccountData, AccountInfo, GenesisHash, Moment};
pub use console::{ConsoleLevel, ConsoleLine};
