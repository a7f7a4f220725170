pub mod entity;
pub mod issue;
pub mod onestop;
