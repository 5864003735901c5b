pub mod match_scoring;
