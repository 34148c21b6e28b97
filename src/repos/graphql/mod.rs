pub mod analytics;
pub mod application;
pub mod review;
pub mod scholarship;
pub mod user;
pub mod utils;
