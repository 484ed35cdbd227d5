use intersection_controller::config::ControllerConfig;
use intersection_controller::control_system::TrafficLightController;
use intersection_controller::detection::{run_detector_loop, RandomSirenDetector};
use intersection_controller::monitoring::admin_cli::{run_cli, CliExit};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match ControllerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    let controller = match TrafficLightController::from_config(&config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Controller error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting intersection controller (green {}s, yellow {}s)",
        config.green_duration_secs,
        config.yellow_duration_secs
    );
    let driver = controller.spawn_driver(config.tick_interval());

    let detector = config.siren_simulation.then(|| {
        log::info!("Siren simulation enabled");
        tokio::spawn(run_detector_loop(
            controller.clone(),
            RandomSirenDetector::from_config(&config),
            config.siren_poll_interval(),
        ))
    });

    match run_cli(controller).await {
        CliExit::Requested => {
            driver.abort();
            if let Some(detector) = detector {
                detector.abort();
            }
        }
        // No operator attached: keep the intersection running until the
        // process is stopped.
        CliExit::EndOfInput => {
            log::info!("Admin input closed, controller keeps running");
            if let Err(e) = driver.await {
                log::error!("Driver task ended: {}", e);
            }
        }
    }
}
