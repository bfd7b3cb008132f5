mod fetcher_tests;
mod normalize_tests;
mod summary_tests;
mod utils;
