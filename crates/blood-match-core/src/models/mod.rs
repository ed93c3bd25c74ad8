//! Domain models for the blood match system.

mod blood_type;
mod donor;
mod history;
mod request;

pub use blood_type::*;
pub use donor::*;
pub use history::*;
pub use request::*;
