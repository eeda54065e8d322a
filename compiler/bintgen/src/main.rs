//! bintgen CLI

use clap::Parser;

use bintgen::{init_tracing, run, Options};

fn main() {
    init_tracing();

    let options = Options::parse();
    if let Err(err) = run(&options) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
