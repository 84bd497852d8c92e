pub fn run() -> anyhow::Result<()> {
    println!("pipeworks {}", env!("CARGO_PKG_VERSION"));
    println!("In-process pipes and filters message routing");
    Ok(())
}
