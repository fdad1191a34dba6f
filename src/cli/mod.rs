pub mod convert;
pub mod recipient;
pub mod send;
pub mod setup;
pub mod ui;
