use std::process::ExitCode;

fn main() -> ExitCode {
    motoquote_cli::run()
}
