pub mod catalog;
pub mod test_runs;
