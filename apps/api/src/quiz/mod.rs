// AI quiz: prompt the generative API, parse its free-text answer into questions, grade
// submitted answers.

pub mod generator;
pub mod grading;
pub mod handlers;
pub mod parser;
