use devserve::root::RootStrategy;

/// Serve the current working directory
fn main() -> Result<(), Box<dyn std::error::Error>> {
    devserve::app::run(RootStrategy::CurrentDir)
}
