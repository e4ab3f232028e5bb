mod cli;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use mascot_common::{AnimationId, PlaybackError, Point, SoundEffect};
use mascot_scheduler::sequence::KONAMI_SEQUENCE;
use mascot_scheduler::{AnimationSink, EnvEvent, Scheduler, SchedulerConfig};

/// Sink that logs every playback instead of driving a sprite.
struct TracingSink;

impl AnimationSink for TracingSink {
    fn play(&mut self, animation: AnimationId) -> Result<(), PlaybackError> {
        tracing::info!(%animation, "play");
        Ok(())
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        tracing::info!(?effect, "sound");
    }

    fn speak(&mut self, text: &str, duration: Duration) {
        tracing::info!(text, ?duration, "speech bubble");
    }
}

fn load_config(path: Option<&str>) -> SchedulerConfig {
    let Some(path) = path else {
        return SchedulerConfig::default();
    };
    let result = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| SchedulerConfig::from_toml_str(&s).map_err(|e| e.to_string()));
    match result {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            SchedulerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("mascot=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "mascot=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Mascot v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref());
    let mut scheduler = match args.seed {
        Some(seed) => Scheduler::with_seed(config, seed),
        None => Scheduler::new(config),
    };
    scheduler.set_sink(Box::new(TracingSink));

    let mut bus_rx = scheduler.bus().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = bus_rx.recv().await {
            tracing::debug!(?event, "bus");
        }
    });

    let handle = mascot_scheduler::spawn(scheduler);
    handle.send(EnvEvent::SetEnabled(true));
    handle.send(EnvEvent::AgentMoved(Point::new(400.0, 300.0)));

    // Scripted walk through the scheduler's repertoire.
    tracing::info!("pointer sweep");
    handle.send(EnvEvent::PointerMoved(Point::new(50.0, 300.0)));
    tokio::time::sleep(Duration::from_millis(400)).await;
    handle.send(EnvEvent::PointerMoved(Point::new(400.0, 30.0)));
    tokio::time::sleep(Duration::from_millis(400)).await;

    tracing::info!("fast typing burst");
    for _ in 0..20 {
        handle.send(EnvEvent::KeyDown {
            key: "a".into(),
            mods: Default::default(),
            editable: true,
        });
        tokio::time::sleep(Duration::from_millis(80)).await;
    }

    tracing::info!("errors appear, then clear");
    handle.send(EnvEvent::ErrorCountChanged(3));
    tokio::time::sleep(Duration::from_secs(4)).await;
    handle.send(EnvEvent::ErrorCountChanged(0));
    tokio::time::sleep(Duration::from_secs(1)).await;

    tracing::info!("anger spike");
    handle.send(EnvEvent::AngerChanged(2));
    tokio::time::sleep(Duration::from_secs(6)).await;

    tracing::info!("konami");
    for key in KONAMI_SEQUENCE {
        handle.send(EnvEvent::KeyDown {
            key: key.into(),
            mods: Default::default(),
            editable: false,
        });
    }
    tokio::time::sleep(Duration::from_secs(3)).await;

    tracing::info!("speech");
    handle.send(EnvEvent::Speak("I saw what you pushed to main.".into()));
    tokio::time::sleep(Duration::from_secs(3)).await;

    tracing::info!("close attempt");
    handle.send(EnvEvent::CloseRequested);
    tokio::time::sleep(Duration::from_secs(3)).await;

    handle.send(EnvEvent::SetEnabled(false));
    handle.shutdown().await;
    tracing::info!("Shutdown complete");
}
