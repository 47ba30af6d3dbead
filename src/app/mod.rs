// application modes called from main

mod calculator;

pub use calculator::CalculatorApp;
