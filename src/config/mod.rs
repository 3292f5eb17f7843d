pub mod profiles;

pub use crate::config::profiles::ProfilesFile;
