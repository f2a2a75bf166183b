//! Cooldowns, Timers and Timelines
//!
//! All three are driven by the caller: they read the time they are given
//! and never schedule themselves.

use std::collections::BTreeMap;

/// Deferred callback.
pub type Callback = Box<dyn FnMut()>;

/// Per-key rate limiter.
#[derive(Clone, Debug, Default)]
pub struct Cooldowns {
    last_fired: BTreeMap<String, f64>,
}

impl Cooldowns {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `key` has never fired or at least `ms` have passed since it
    /// last did. A true result records `now` as the new firing time;
    /// a false result changes nothing.
    pub fn ready(&mut self, key: &str, ms: f64, now: f64) -> bool {
        match self.last_fired.get(key) {
            Some(last) if now - last < ms => false,
            _ => {
                self.last_fired.insert(key.to_string(), now);
                true
            }
        }
    }

    /// Forget `key`, making it ready again.
    pub fn reset(&mut self, key: &str) {
        self.last_fired.remove(key);
    }
}

struct PendingTimer {
    due: f64,
    callback: Callback,
}

/// One-shot timers fired from `tick`.
#[derive(Default)]
pub struct Timers {
    pending: Vec<PendingTimer>,
}

impl Timers {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on the first `tick` at or after `now + ms`.
    pub fn after(&mut self, ms: f64, now: f64, callback: impl FnMut() + 'static) {
        self.pending.push(PendingTimer {
            due: now + ms,
            callback: Box::new(callback),
        });
    }

    /// Fire and remove every due timer, newest first.
    ///
    /// Returns how many fired.
    pub fn tick(&mut self, now: f64) -> usize {
        let mut fired = 0;
        for i in (0..self.pending.len()).rev() {
            if now >= self.pending[i].due {
                let mut timer = self.pending.remove(i);
                (timer.callback)();
                fired += 1;
            }
        }
        fired
    }

    /// Timers not yet fired.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

struct TimelineStep {
    at: f64,
    callback: Callback,
    done: bool,
}

/// Scripted sequence of callbacks keyed by absolute time.
#[derive(Default)]
pub struct Timeline {
    steps: Vec<TimelineStep>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step at time `at`.
    pub fn add(&mut self, at: f64, callback: impl FnMut() + 'static) {
        self.steps.push(TimelineStep {
            at,
            callback: Box::new(callback),
            done: false,
        });
    }

    /// Fire every step whose time has come, once, in insertion order.
    pub fn run(&mut self, t: f64) -> usize {
        let mut fired = 0;
        for step in self.steps.iter_mut().filter(|s| !s.done && t >= s.at) {
            step.done = true;
            (step.callback)();
            fired += 1;
        }
        fired
    }

    /// True once every step has fired.
    pub fn is_finished(&self) -> bool {
        self.steps.iter().all(|s| s.done)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_cooldown_window() {
        let mut cd = Cooldowns::new();
        assert!(cd.ready("shoot", 250.0, 0.0));
        assert!(!cd.ready("shoot", 250.0, 100.0));
        assert!(!cd.ready("shoot", 250.0, 249.0));
        assert!(cd.ready("shoot", 250.0, 250.0));
        assert!(!cd.ready("shoot", 250.0, 300.0));
    }

    #[test]
    fn test_cooldown_keys_independent() {
        let mut cd = Cooldowns::new();
        assert!(cd.ready("a", 1000.0, 0.0));
        assert!(cd.ready("b", 1000.0, 10.0));
        cd.reset("a");
        assert!(cd.ready("a", 1000.0, 20.0));
    }

    #[test]
    fn test_timers_fire_on_tick_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut timers = Timers::new();

        let l = log.clone();
        timers.after(100.0, 0.0, move || l.borrow_mut().push("first"));
        let l = log.clone();
        timers.after(50.0, 0.0, move || l.borrow_mut().push("second"));

        assert_eq!(timers.tick(49.0), 0);
        assert_eq!(timers.tick(60.0), 1);
        assert_eq!(*log.borrow(), vec!["second"]);

        assert_eq!(timers.tick(500.0), 1);
        assert_eq!(*log.borrow(), vec!["second", "first"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_timers_newest_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut timers = Timers::new();
        for i in 0..3 {
            let l = log.clone();
            timers.after(0.0, 0.0, move || l.borrow_mut().push(i));
        }
        timers.tick(0.0);
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn test_timeline_fires_once() {
        let count = Rc::new(RefCell::new(0));
        let mut timeline = Timeline::new();
        let c = count.clone();
        timeline.add(1.0, move || *c.borrow_mut() += 1);
        let c = count.clone();
        timeline.add(2.0, move || *c.borrow_mut() += 10);

        assert_eq!(timeline.run(0.5), 0);
        assert_eq!(timeline.run(1.5), 1);
        assert_eq!(timeline.run(1.5), 0);
        assert!(!timeline.is_finished());
        assert_eq!(timeline.run(5.0), 1);
        assert_eq!(*count.borrow(), 11);
        assert!(timeline.is_finished());
    }
}
