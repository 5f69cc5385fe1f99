// Models module for data structures
pub mod bit_sum_array;
pub mod report;
pub mod span;
