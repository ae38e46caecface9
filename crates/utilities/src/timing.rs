use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::debug;

/// Collects the durations of named phases.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f64)>>>,
}

/// A running measurement, registered with its [Timing] on [Timer::finish].
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f64)>>>,
    registered: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer for the phase with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the recorded phases and their durations in seconds.
    pub fn results(&self) -> Vec<(String, f64)> {
        self.results.borrow().clone()
    }

    /// Prints all the finished timers.
    pub fn print(&self) {
        for (name, time) in self.results.borrow().iter() {
            eprintln!("Time {}: {:.3}s", name, time);
        }
    }
}

impl Timer {
    /// Stops the timer and records its duration.
    pub fn finish(&mut self) {
        let time = self.start.elapsed().as_secs_f64();
        debug!("Time {}: {:.3}s", self.name, time);

        if !self.registered {
            self.results.borrow_mut().push((self.name.clone(), time));
            self.registered = true;
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            debug!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}
