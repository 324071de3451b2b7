pub mod defaults;
pub mod measure;
