use pbkv::{Address, PbServerConfig, PbServerOptions, ViewServiceConfig, ViewServiceOptions};
use slog::Drain;
use std::error::Error;

const USAGE: &str = "usage: pbkv viewservice <listen-addr>\n       pbkv pbserver <viewservice-addr> <listen-addr>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let logger = create_root_logger();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["viewservice", address] => {
            let view_service = pbkv::start_view_service(ViewServiceConfig {
                address: Address::new(*address),
                logger: logger.clone(),
                options: ViewServiceOptions::default(),
            })
            .await?;

            tokio::signal::ctrl_c().await?;
            view_service.kill();
        }
        ["pbserver", view_service_address, address] => {
            let replica = pbkv::start_pb_server(PbServerConfig {
                address: Address::new(*address),
                view_service_address: Address::new(*view_service_address),
                logger: logger.clone(),
                options: PbServerOptions::default(),
            })
            .await?;

            tokio::signal::ctrl_c().await?;
            let requests_served = replica.kill().await?;
            slog::info!(logger, "Served {} requests", requests_served);
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn create_root_logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
