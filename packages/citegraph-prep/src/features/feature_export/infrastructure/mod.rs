//! Feature export infrastructure

pub mod csv_writer;

pub use csv_writer::write_feature_csv;
