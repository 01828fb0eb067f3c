fn main() {
    if let Err(e) = yoru_optimized_lib::run() {
        eprintln!("[Yoru Optimized] {e}");
        std::process::exit(1);
    }
}
