mod arm;
mod calibration;
mod controller;
mod landmarks;
mod mapper;
mod runner;
mod sim;
mod timer;
mod types;

use std::io::BufRead;
use std::thread;
use std::time::Instant;

use anyhow::Result;
use crossbeam_channel::bounded;

use crate::controller::Controller;
use crate::sim::{MemoryArm, ScriptedHand};
use crate::types::Channel;

fn main() -> Result<()> {
    env_logger::init();

    let (stop_tx, stop_rx) = bounded(1);
    thread::spawn(move || {
        // Enter stops the loop between iterations.
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
        let _ = stop_tx.send(());
    });

    // Scripted session standing in for the camera/estimator and the arm; a
    // real deployment plugs hardware-backed implementations in here.
    let mut provider = ScriptedHand::demo_session();
    let mut arm = MemoryArm::new();
    let mut controller = Controller::new(Instant::now());

    if let Err(err) = runner::run(&mut provider, &mut arm, &mut controller, &stop_rx) {
        log::error!("{err:#}");
    }

    for channel in Channel::ALL {
        log::info!("final {channel} position: {}", arm.position_of(channel));
    }

    Ok(())
}
