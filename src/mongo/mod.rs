pub mod connection;
pub mod fields;
#[cfg(test)]
pub mod memory;
pub mod store;
mod tests;
