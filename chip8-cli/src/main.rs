//! Entrypoint for CLI
use std::{env, error::Error, fs, time::Instant};

use chip8::{constants::*, prelude::*, Clock, IMPL_VERSION};
use log::{debug, error, info};
use serde::Deserialize;

static USAGE: &str = r#"
usage: chip8 CMD FILE [CONFIG]

commands:
    run     Run the target ROM file, with an optional YAML configuration
    dis     Disassemble the target ROM into readable assembly, with the
            quirks of an optional YAML configuration

examples:
    chip8 run breakout.rom
    chip8 run breakout.rom breakout.yaml
    chip8 dis breakout.rom
    chip8 dis breakout.rom breakout.yaml
"#;

/// Number of frames run when the configuration doesn't say.
const DEFAULT_FRAMES: usize = 600;

/// Host settings, read from a YAML file.
///
/// ```yaml
/// frames: 120
/// keys: [5]
/// machine:
///   clock_frequency: 1000
///   font: vip
///   quirks:
///     shift_uses_vy: true
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
struct HostConf {
    /// Number of 60Hz frames to run before printing the display.
    frames: usize,
    /// Run frames back to back instead of in real time.
    unthrottled: bool,
    /// Keys held down for the whole run.
    keys: Vec<KeyCode>,
    machine: Chip8Conf,
}

impl Default for HostConf {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            unthrottled: false,
            keys: Vec::new(),
            machine: Chip8Conf::default(),
        }
    }
}

fn load_conf(filepath: Option<&str>) -> Result<HostConf, Box<dyn Error>> {
    match filepath {
        Some(filepath) => {
            let text = fs::read_to_string(filepath)?;
            let conf = serde_yaml::from_str(&text)?;
            debug!("configuration from {filepath}: {conf:?}");
            Ok(conf)
        }
        None => Ok(HostConf::default()),
    }
}

fn run_bytecode(filepath: &str, conf_path: Option<&str>) -> Result<(), Box<dyn Error>> {
    info!("running bytecode interpreter");

    let conf = load_conf(conf_path)?;
    let bytecode = fs::read(filepath)?;

    let mut vm = Chip8Vm::new(conf.machine);
    vm.load_bytecode(bytecode.as_slice())?;

    let keypad = vm.keypad();
    for key in &conf.keys {
        keypad.press(*key);
    }
    if !conf.keys.is_empty() {
        info!("{}", vm.dump_keys()?);
    }

    // Frames tick at the rate the timers count down.
    let mut clock = Clock::new(Hz(DELAY_FREQUENCY));
    let frame_ms = MILLIS_IN_SECOND / DELAY_FREQUENCY as f64;

    let start = Instant::now();
    let mut result = Ok(());
    for frame in 0..conf.frames {
        let elapsed_ms = if conf.unthrottled {
            frame_ms
        } else {
            clock.wait()
        };

        if let Err(err) = vm.update(elapsed_ms) {
            error!("frame {frame}: {err}");
            result = Err(err);
            break;
        }
    }

    info!(
        "time taken: {}ms",
        start.elapsed().as_nanos() as f64 / 1000000.0
    ); // to millis
    println!("{}", vm.dump_display()?);

    result?;

    Ok(())
}

fn run_disassembler(filepath: &str, conf_path: Option<&str>) -> Result<(), Box<dyn Error>> {
    info!("running disassembler");

    let conf = load_conf(conf_path)?;
    let bytecode = fs::read(filepath)?;
    let listing = Disassembler::with_origin(&bytecode, conf.machine.program_start)
        .with_quirks(conf.machine.quirks)
        .listing()?;
    print!("{listing}");

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new().env().init()?;

    match parse_args() {
        Some(Cmd::Run { filepath, conf }) => run_bytecode(&filepath, conf.as_deref())?,
        Some(Cmd::Dis { filepath, conf }) => run_disassembler(&filepath, conf.as_deref())?,
        None => {
            print_usage();
            // FreeBSD EX_USAGE (64)
            std::process::exit(64)
        }
    }

    Ok(())
}

fn parse_args() -> Option<Cmd> {
    let mut args = env::args().skip(1);
    match args.next()?.as_str() {
        "run" => Some(Cmd::Run {
            filepath: args.next()?,
            conf: args.next(),
        }),
        "dis" => Some(Cmd::Dis {
            filepath: args.next()?,
            conf: args.next(),
        }),
        _ => None,
    }
}

fn print_usage() {
    println!("Chip8 v{IMPL_VERSION}");
    println!("{USAGE}");
}

enum Cmd {
    /// Run file
    Run {
        filepath: String,
        conf: Option<String>,
    },
    /// Disassemble
    Dis {
        filepath: String,
        conf: Option<String>,
    },
}
