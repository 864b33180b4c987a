extern crate env_logger;
#[macro_use]
extern crate log;
extern crate sensehat_pen;

use sensehat_pen::{Display, PenResult, Session, Settings, Stick};

use std::io::{self, Write};

fn main() -> PenResult<()> {
    env_logger::init();

    let settings = Settings::default();
    let mut display = Display::new()?;
    display.clear(None);
    display.set_rotation(settings.rotation, false);
    let mut stick = Stick::new()?;

    let mut session = Session::new(&settings);
    info!("drawing on a {}x{} canvas", settings.width, settings.height);

    let result = session.run(&mut display, &mut stick, |session| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "\r{}", session)?;
        out.flush()?;
        Ok(())
    });
    if let Err(ref err) = result {
        error!("{}", err);
    }
    result
}
