pub mod alert;
pub mod barrier;
pub mod location;
pub mod report;
pub mod route;
pub mod user;
