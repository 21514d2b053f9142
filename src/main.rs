fn main() {
    if let Err(e) = minbar::cli::main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
