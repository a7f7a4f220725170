mod import_configuration;
mod operator_in_feed;

pub use import_configuration::ImportConfiguration;
pub use operator_in_feed::OperatorInFeed;
