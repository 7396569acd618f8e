use anyhow::Result;
use embedded_graphics::{geometry::Size, pixelcolor::Rgb888, Drawable};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::info;
use std::{sync::mpsc, thread, thread::JoinHandle, time::Duration};
use tracer_hardware::{Device, FrameBuffer};
use tracer_input::Command;

static WINDOW_TITLE: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " v",
    env!("CARGO_PKG_VERSION"),
    " simulator"
);

#[derive(Debug)]
pub struct Simulator {
    _handle: JoinHandle<Result<()>>,
    sender: mpsc::Sender<FrameBuffer>,
    size: Size,
}

impl Simulator {
    /// Opens the simulator window on its own thread. Arrow keys are forwarded
    /// to `sender` as progress commands, closing the window sends
    /// `Command::Shutdown`.
    pub fn connect(size: Size, sender: tokio::sync::broadcast::Sender<Command>) -> Self {
        let (tx, rx) = mpsc::channel::<FrameBuffer>();
        let handle = thread::spawn(move || {
            let mut display = SimulatorDisplay::<Rgb888>::new(size);

            let output_settings = OutputSettingsBuilder::new().scale(2).build();
            let mut window = Window::new(WINDOW_TITLE, &output_settings);

            'outer: loop {
                if let Ok(image) = rx.recv_timeout(Duration::from_millis(10)) {
                    image.draw(&mut display)?;
                }

                window.update(&display);

                for x in window.events() {
                    match x {
                        SimulatorEvent::KeyUp { keycode, .. } => {
                            let command = match keycode {
                                Keycode::Up | Keycode::Right => Some(Command::IncreaseProgress),
                                Keycode::Down | Keycode::Left => Some(Command::DecreaseProgress),
                                _ => None,
                            };
                            if let Some(command) = command {
                                sender.send(command)?;
                            }
                            Ok::<(), anyhow::Error>(())
                        }
                        SimulatorEvent::Quit => {
                            info!("Simulator window closed");
                            sender.send(Command::Shutdown)?;
                            break 'outer;
                        }
                        _ => Ok(()),
                    }?;
                }
            }

            Ok(())
        });

        Simulator {
            _handle: handle,
            sender: tx,
            size,
        }
    }
}

impl Device for Simulator {
    fn draw(&mut self, display: &FrameBuffer) -> Result<()> {
        self.sender.send(display.clone())?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let new = FrameBuffer::new(self.size, Rgb888::new(0, 0, 0))?;
        self.draw(&new)?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
