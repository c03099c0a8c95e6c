use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bvhcast::{MotionData, PlaybackServer, ServerArgs, extract_frame_time};

fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    init_logging();

    let data = Arc::new(MotionData::load(&args.bvhfile)?);

    // A configured delay of 0 means: use the frame time from the BVH file.
    let delay_micros = if args.frametime == 0 {
        let derived = extract_frame_time(data.bytes())
            .with_context(|| format!("deriving frame time from {}", args.bvhfile.display()))?;
        info!("Frametime: {}", derived);
        derived
    } else {
        args.frametime
    };

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(serve(args, data, delay_micros))
}

async fn serve(args: ServerArgs, data: Arc<MotionData>, delay_micros: u64) -> anyhow::Result<()> {
    let server = PlaybackServer::bind(args.port, data, args.format, delay_micros).await?;

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                trigger.cancel();
            }
            Err(error) => warn!("Failed to listen for interrupt: {}", error),
        }
    });

    server.run(shutdown).await;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", error);
    }
}
