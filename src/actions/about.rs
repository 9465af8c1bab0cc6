use colored::*;
use crate::report::ABOUT;

pub fn execute() {
    println!("{}", "What is this about?".bold());
    println!("{}", textwrap::fill(ABOUT, 78));
}
