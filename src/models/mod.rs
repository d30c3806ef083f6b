mod appointment;
mod clinic;
mod options;
mod patient;
mod scheduled_test;
mod status;
mod test_result;

pub use appointment::*;
pub use clinic::*;
pub use lab_test::*;
pub use options::*;
pub use patient::*;
pub use scheduled_test::*;
pub use status::*;
pub use test_result::*;
