use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{error, info, warn};

use spada::config::AppConfig;
use spada::gateway::{GatewayState, configure_gateway};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(non_blocking_writer);

    if config.is_development() {
        tracing_builder.with_file(true).with_line_number(true).init();
    } else {
        tracing_builder.json().init();
    }

    let state = match GatewayState::from_config(&config.gateway) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("Gateway startup failed: {}", e.format_simple());
            std::process::exit(1);
        }
    };
    for route in &config.gateway.routes {
        info!("{} -> {}", route.prefix, route.upstream);
    }

    let bind_address = config.gateway_bind_address();
    warn!("Starting gateway at http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            ))
            .configure(configure_gateway)
    })
    .workers(config.server.workers)
    .bind(bind_address)?
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = spada::runtime::lifetime::shutdown::listen_for_shutdown() => {
            warn!("Gateway stopped");
        }
    }

    Ok(())
}
