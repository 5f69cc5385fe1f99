// Services module: the sorting algorithm and the work built on it
pub mod benchmark;
pub mod data_generator;
pub mod fade_sort;
pub mod insertion_sort;
pub mod merges;
pub mod quick_sort;
pub mod stability;
