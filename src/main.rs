use clap::Parser;

#[derive(Parser)]
#[command(name = "srcds-sync")]
#[command(version)]
#[command(
    about = "Sync custom maps and configuration files from object storage before SRCDS launch",
    long_about = None
)]
struct Cli {
    /// Object-store address of the map repository (s3://bucket/prefix)
    #[arg(long, value_name = "ADDRESS")]
    maps: Option<String>,

    /// Object-store address of the configuration repository (s3://bucket/prefix)
    #[arg(long, value_name = "ADDRESS")]
    config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    println!("Beginning server configuration...");

    if let Err(e) = srcds_sync::configure(cli.maps.as_deref(), cli.config.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
