use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::thread;

use clap::Parser;
use crossbeam_channel::Receiver;

use fatigueguard_core::detection::infrastructure::trace_landmark_source::TraceLandmarkSource;
use fatigueguard_core::fatigue::domain::fatigue_event::FatigueEvent;
use fatigueguard_core::fatigue::domain::fatigue_event_sink::FatigueEventSink;
use fatigueguard_core::fatigue::domain::fatigue_state_machine::FatigueStateMachine;
use fatigueguard_core::fatigue::infrastructure::channel_event_sink::ChannelEventSink;
use fatigueguard_core::fatigue::infrastructure::logging_event_sink::LoggingEventSink;
use fatigueguard_core::fatigue::infrastructure::sink_factory::apply_delivery_policy;
use fatigueguard_core::pipeline::fatigue_monitor::FatigueMonitor;
use fatigueguard_core::pipeline::frame_report::FrameReport;
use fatigueguard_core::pipeline::monitor_config::MonitorConfig;
use fatigueguard_core::pipeline::monitor_fatigue_use_case::{FrameCallback, MonitorFatigueUseCase};
use fatigueguard_core::pipeline::session_logger::StdoutSessionLogger;

/// Alerts beyond this backlog are dropped by the channel sink.
const ALERT_QUEUE_CAPACITY: usize = 16;

/// Replays a recorded facial-landmark trace through the fatigue detector.
#[derive(Parser)]
#[command(name = "fatigueguard")]
struct Cli {
    /// Landmark trace: one JSON observation per line.
    trace: PathBuf,

    /// Config file (defaults to the platform config location if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Eyes count as closed below this averaged eye aspect ratio.
    #[arg(long)]
    ear_threshold: Option<f64>,

    /// The mouth counts as yawning above this mouth aspect ratio.
    #[arg(long)]
    mar_threshold: Option<f64>,

    /// Consecutive frames before closure alerts or a yawn qualifies.
    #[arg(long)]
    sustained_frames: Option<u32>,

    /// Consecutive frames without a face before state is reset.
    #[arg(long)]
    reset_after_misses: Option<u32>,

    /// Also clear drowsy and yawn counters when the face is lost.
    #[arg(long)]
    reset_counters: bool,

    /// Minimum frames between delivered drowsy alerts (0 = no limit).
    #[arg(long)]
    alert_cooldown: Option<u64>,

    /// Do not announce completed yawns.
    #[arg(long)]
    no_yawns: bool,

    /// Print the overlay line for every frame.
    #[arg(long)]
    verbose_frames: bool,

    /// Print the session summary as JSON.
    #[arg(long)]
    json: bool,

    /// Write the effective configuration to this path and continue.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if !cli.trace.exists() {
        return Err(format!("Trace file not found: {}", cli.trace.display()).into());
    }

    let config = build_config(&cli)?;
    if let Some(path) = &cli.save_config {
        config.save(path)?;
        log::info!("Configuration written to {}", path.display());
    }
    log::info!(
        "Thresholds: EAR < {}, MAR > {}, {} frames; landmark mapping {} v{}",
        config.thresholds.ear_threshold,
        config.thresholds.mar_threshold,
        config.thresholds.sustained_frames,
        config.mapping.name,
        config.mapping.version
    );

    let (alert_tx, alert_rx) = crossbeam_channel::bounded(ALERT_QUEUE_CAPACITY);
    let alert_handle = spawn_alert_player(alert_rx);

    let sinks: Vec<Box<dyn FatigueEventSink>> = vec![
        Box::new(LoggingEventSink::new()),
        apply_delivery_policy(
            Box::new(ChannelEventSink::new(alert_tx)),
            config.alert_cooldown_frames,
            config.report_yawns,
        ),
    ];
    let monitor = FatigueMonitor::new(
        config.mapping.clone(),
        FatigueStateMachine::new(config.thresholds)?,
        sinks,
        config.face_loss,
    );

    let on_frame: Option<FrameCallback> = if cli.verbose_frames {
        Some(Box::new(|report: &FrameReport| println!("{report}")))
    } else {
        None
    };

    let source = TraceLandmarkSource::open(&cli.trace)?;
    let mut use_case = MonitorFatigueUseCase::new(
        Box::new(source),
        monitor,
        Box::new(StdoutSessionLogger::default()),
        on_frame,
    );
    let result = use_case.execute();

    // Dropping the use case closes the alert channel so the player exits.
    drop(use_case);
    let alerts_played = alert_handle
        .join()
        .map_err(|_| "alert player thread panicked")?;

    let summary = result?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
        println!("Alerts played:  {alerts_played}");
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::load_or_default()?,
    };

    if let Some(v) = cli.ear_threshold {
        config.thresholds.ear_threshold = v;
    }
    if let Some(v) = cli.mar_threshold {
        config.thresholds.mar_threshold = v;
    }
    if let Some(v) = cli.sustained_frames {
        config.thresholds.sustained_frames = v;
    }
    if let Some(v) = cli.reset_after_misses {
        config.face_loss.reset_after_misses = v;
    }
    if cli.reset_counters {
        config.face_loss.reset_counters = true;
    }
    if let Some(v) = cli.alert_cooldown {
        config.alert_cooldown_frames = v;
    }
    if cli.no_yawns {
        config.report_yawns = false;
    }

    config.validate()?;
    Ok(config)
}

/// Stand-in for audio playback: rings the terminal bell per drowsy alert.
fn spawn_alert_player(rx: Receiver<FatigueEvent>) -> thread::JoinHandle<usize> {
    thread::spawn(move || {
        let mut played = 0;
        for event in rx {
            match event {
                FatigueEvent::DrowsyAlert { .. } => {
                    played += 1;
                    eprint!("\x07");
                    let _ = std::io::stderr().flush();
                    eprintln!("{event}");
                }
                FatigueEvent::YawnCompleted { .. } => eprintln!("{event}"),
            }
        }
        played
    })
}
