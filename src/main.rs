use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use touchpadlib::discovery::udev_discovery::UdevDiscovery;
use touchpadlib::discovery::{select_device, DeviceDiscovery};
use touchpadlib::{names, InputError, TouchpadEvent};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "touchpadlib", about = "Touchpad event decoder", version)]
struct Cli {
    /// Device node to open; prompts with a device list when omitted
    #[arg(short, long, env = "TOUCHPADLIB_DEVICE", global = true)]
    device: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace with raw records)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List input event devices
    List,
    /// Print the capability report of a device
    Info,
    /// Print decoded touchpad samples
    Stream {
        /// Stop after this many samples
        #[arg(short = 'n', long)]
        count: Option<u64>,

        /// Consecutive short reads tolerated before giving up
        #[arg(long, default_value_t = 0)]
        max_short_reads: u32,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("touchpadlib={}", level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn choose_device(device: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = device {
        return Ok(path);
    }
    let devices = UdevDiscovery::find_devices()?;
    Ok(select_device(&devices, io::stdin().lock(), io::stderr())?)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::List => {
            for device in UdevDiscovery::find_devices()? {
                let marker = if device.is_touchpad { "\ttouchpad" } else { "" };
                println!("{}\t{}{}", device.devnode.display(), device.name, marker);
            }
        }
        Command::Info => {
            let path = choose_device(cli.device)?;
            let touchpad = touchpadlib::initialize(&path)?;
            print!("{}", names::format_report(touchpad.capabilities()));
            touchpad.close()?;
        }
        Command::Stream {
            count,
            max_short_reads,
        } => {
            let path = choose_device(cli.device)?;
            let mut touchpad = touchpadlib::initialize(&path)?;
            if !touchpad.capabilities().is_touchpad_capable() {
                warn!(path = %path.display(), "device does not report absolute X/Y");
            }

            let mut event = TouchpadEvent::allocate();
            let mut produced = 0u64;
            let mut short_reads = 0u32;
            while count.map_or(true, |n| produced < n) {
                match touchpad.decode_into(&mut event) {
                    Ok(()) => {
                        short_reads = 0;
                        produced += 1;
                        println!("{}", event);
                    }
                    Err(InputError::ShortRead { .. }) if short_reads < max_short_reads => {
                        short_reads += 1;
                    }
                    // Dropping the touchpad releases the device.
                    Err(e) => return Err(e.into()),
                }
            }
            event.release();
            touchpad.close()?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
