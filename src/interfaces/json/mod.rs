pub mod payload_reader;
pub mod result_writer;
