use std::process::ExitCode;

fn main() -> ExitCode {
    pretty_env_logger::init();

    match koeri_quake_map::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
