// File I/O: delimited record files in, graph documents out

pub mod csv;
pub mod json;
