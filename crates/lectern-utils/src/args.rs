pub mod db;
pub mod learning;
