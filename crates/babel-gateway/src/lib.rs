pub mod gateway;

#[cfg(test)]
mod tests;

pub use gateway::{DEFAULT_ATTEMPT_TIMEOUT, Gateway};
