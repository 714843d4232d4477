use codegen_cli::{
    run,
    telemetry::{get_subscriber, init_subscriber},
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Init logger
    let subscriber = get_subscriber("info", std::io::stderr);
    init_subscriber(subscriber)?;

    run()
}
