pub mod endpoints;
pub mod run;
