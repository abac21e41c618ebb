fn main() {
    if let Err(err) = task_cli::run(std::env::args_os()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
