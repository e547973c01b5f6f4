fn main() -> Result<(), Box<dyn std::error::Error>> {
    pkglink_cli::run()
}
