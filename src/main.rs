use std::process::ExitCode;

use bootmount::output as out;

mod app;

fn main() -> ExitCode {
    let args = bootmount::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
