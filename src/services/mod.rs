pub mod acceptance;
pub mod intake;
pub mod sessions;
pub mod validation;
