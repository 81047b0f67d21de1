fn main() {
    if let Err(e) = starburst::core::WindowEngine::run() {
        eprintln!("Engine failed: {}", e);
        std::process::exit(1);
    }
}
