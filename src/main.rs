fn main() {
    if let Err(e) = quick_bill_lib::run() {
        tracing::error!("Command failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
