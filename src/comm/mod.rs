pub mod lametric;
pub mod sensor;

#[cfg(test)]
pub(crate) mod test_server;

pub use sensor::fetch_reading;
