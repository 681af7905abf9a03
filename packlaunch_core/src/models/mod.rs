pub mod manifest;
pub mod options;
