// NES Emulator - headless CLI harness
//
// Loads an iNES image, runs the configured number of frames and writes a
// PNG screenshot of the final frame. Windowing and input decoding belong
// to front-end collaborators; this binary only drives the core.

use std::env;
use std::path::Path;
use std::process;

use nescore::{Cartridge, EmulatorConfig, Nes};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let rom_path = match args.get(1) {
        Some(path) => path.clone(),
        None => {
            eprintln!("usage: {} <rom.nes>", args[0]);
            process::exit(2);
        }
    };

    if let Err(e) = run(&rom_path) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(rom_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = EmulatorConfig::load_or_default();

    let cartridge = Cartridge::from_ines_file(rom_path)?;
    let mut nes = Nes::new(cartridge);
    nes.init()?;

    log::info!("running {} frames of {}", config.run.frames, rom_path);
    for _ in 0..config.run.frames {
        nes.step_frame();
    }

    let screenshot = nes.screenshot(Some(Path::new(rom_path)))?;
    println!("{}", screenshot.display());

    Ok(())
}
