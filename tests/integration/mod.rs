mod support;
mod sync_tests;
mod persistence_tests;
