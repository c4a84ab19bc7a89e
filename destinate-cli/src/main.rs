//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = destinate_cli::run() {
        eprintln!("destinate: {err}");
        std::process::exit(1);
    }
}
