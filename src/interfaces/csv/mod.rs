pub mod fare_writer;
pub mod request_reader;
