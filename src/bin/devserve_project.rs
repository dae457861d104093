use devserve::root::RootStrategy;

/// Serve the project the binary is installed in (`<project>/bin/devserve-project`
/// serves `<project>`), whatever the working directory
fn main() -> Result<(), Box<dyn std::error::Error>> {
    devserve::app::run(RootStrategy::Installation)
}
