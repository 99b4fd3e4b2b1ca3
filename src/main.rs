use clap::Parser;
use rail_commands::Cli;
use rail_utils::term::print_error;

fn main() {
    if let Err(e) = Cli::parse().invoke() {
        let _ = print_error(&e.to_string());
        std::process::exit(1);
    }
}
