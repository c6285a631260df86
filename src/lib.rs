pub mod cli;
pub mod config;
pub mod dispatch;
pub mod evidence;
pub mod jobs;
pub mod logging;
pub mod placement;
pub mod request;
pub mod status;
