use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry {
    key: &'static str,
    depth: usize,
    start: Option<Instant>,
    elapsed: Duration,
}

/// Nested wall clock timers.
///
/// Timers are identified by a static key and started as children of the
/// timer that is currently running, so that `solve` may contain separate
/// `initialize` and `pivoting` phases.
#[derive(Default, Debug)]
pub struct Timers {
    entries: Vec<Entry>,
    // indices into `entries` of the running timers, outermost first
    stack: Vec<usize>,
}

impl Timers {
    fn position(&self, key: &'static str, depth: usize) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key == key && e.depth == depth)
    }

    /// Clears all accumulated times
    pub fn reset(&mut self) {
        self.entries.clear();
        self.stack.clear();
    }

    /// Starts the timer `key` as a child of the current timer
    pub fn start_as_current(&mut self, key: &'static str) {
        let depth = self.stack.len();
        let idx = match self.position(key, depth) {
            Some(idx) => idx,
            None => {
                self.entries.push(Entry {
                    key,
                    depth,
                    start: None,
                    elapsed: Duration::ZERO,
                });
                self.entries.len() - 1
            }
        };
        self.entries[idx].start = Some(Instant::now());
        self.stack.push(idx);
    }

    /// Stops the most recently started timer
    pub fn stop_current(&mut self) {
        if let Some(idx) = self.stack.pop() {
            let e = &mut self.entries[idx];
            if let Some(start) = e.start.take() {
                e.elapsed += start.elapsed();
            }
        }
    }

    // Suspend every running timer.   Used for notimeit!
    pub fn suspend(&mut self) {
        for &idx in self.stack.iter() {
            let e = &mut self.entries[idx];
            if let Some(start) = e.start.take() {
                e.elapsed += start.elapsed();
            }
        }
    }

    // Resume every suspended timer.   Used for notimeit!
    pub fn resume(&mut self) {
        let now = Instant::now();
        for &idx in self.stack.iter() {
            self.entries[idx].start = Some(now);
        }
    }

    /// Accumulated time of the first timer named `key`, at any depth
    pub fn elapsed(&self, key: &'static str) -> Duration {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map_or(Duration::ZERO, |e| e.elapsed)
    }

    /// Sum of all outermost timers
    pub fn total_time(&self) -> Duration {
        self.entries
            .iter()
            .filter(|e| e.depth == 0)
            .fold(Duration::ZERO, |acc, e| acc + e.elapsed)
    }

    pub fn print(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        for e in self.entries.iter() {
            let tabs = format!("{: <1$}", "", 4 * e.depth);
            writeln!(out, "{}{} : {:?}", tabs, e.key, e.elapsed)?;
        }
        Ok(())
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;

#[test]
fn test_nested_timers() {
    let mut timers = Timers::default();
    timeit! {timers => "solve"; {
        timeit! {timers => "pivoting"; {
            std::thread::sleep(Duration::from_millis(2));
        }}
        notimeit! {timers; {
            std::thread::sleep(Duration::from_millis(2));
        }}
    }}
    let solve = timers.elapsed("solve");
    let pivoting = timers.elapsed("pivoting");
    assert!(pivoting >= Duration::from_millis(2));
    assert!(solve >= pivoting);
    assert_eq!(timers.total_time(), solve);

    let mut buf = Vec::new();
    timers.print(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("    pivoting"));

    timers.reset();
    assert_eq!(timers.total_time(), Duration::ZERO);
}
