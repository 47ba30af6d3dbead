#![warn(rust_2018_idioms)]

use riichi_hand::app::CalculatorApp;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    CalculatorApp::new(args).run();
}
