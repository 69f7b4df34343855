//! Command-line tools for R-like summaries of grouped values in Unix pipes.

// dependencies
use std::env;
use std::error::Error;

// modules
mod summarize;

// constants
const TOOLS_NAME: &str = "rvec_tools";

// load and process data
fn main() -> Result<(), Box<dyn Error>> {

    // read command line arguments
    let mut args: Vec<String> = env::args().skip(1).collect(); // drop executable name
    if args.is_empty() { // check for something to do, i.e., a tool to run
        eprintln!("{}: missing tool or command", TOOLS_NAME);
        Err(format!("usage: {} <sum|mean|any>", TOOLS_NAME))?
    }
    let tool = args.remove(0);

    // dispatch to tool or command
    match tool.as_str() {

        /*--------------------------------------------------------------
        grouped reductions of a value column
        ------------------------------------------------------------- */
        // sum of values per group, with TRUE as 1 and FALSE as 0
        "sum"  => summarize::stream(summarize::Reduction::Sum),

        // optionally trimmed mean of values per group
        "mean" => summarize::stream(summarize::Reduction::Mean),

        // whether any value per group is TRUE
        "any"  => summarize::stream(summarize::Reduction::Any),

        /*--------------------------------------------------------------
        unrecognized tool
        ------------------------------------------------------------- */
        _ => Err(format!("{}: unknown tool or command: {}", TOOLS_NAME, tool))?
    }
}
