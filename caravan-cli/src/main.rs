//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = caravan_cli::run() {
        eprintln!("caravan: {err}");
        std::process::exit(1);
    }
}
