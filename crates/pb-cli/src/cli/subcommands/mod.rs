mod apply;
mod get;

pub use apply::{ApplyCommands, ApplyFeatureArgs, ApplyProjectArgs};
pub use get::{GetCommands, GetFeatureArgs};
