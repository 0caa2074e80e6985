use std::process::ExitCode;

fn main() -> ExitCode {
    match dnsstress::entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
