//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = savour_cli::run() {
        report(&err);
        std::process::exit(1);
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn report(err: &savour_cli::CliError) {
    eprintln!("savour: {err}");
}
