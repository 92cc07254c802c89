use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

pub type Task = Box<dyn FnOnce()>;

/// Defers work to a later turn of the owning thread's event loop.
///
/// Scheduling never runs the task synchronously and returns no handle:
/// deferred work is idempotent, so cancellation is never needed.
pub trait Scheduler {
    fn schedule_once(&self, delay: Duration, task: Task);

    /// Start or restart the timer called `name`. Restarting replaces the
    /// pending firing, so the task runs at most once per start.
    fn schedule_named(&self, name: &'static str, delay: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for std::rc::Rc<S> {
    fn schedule_once(&self, delay: Duration, task: Task) {
        (**self).schedule_once(delay, task)
    }

    fn schedule_named(&self, name: &'static str, delay: Duration, task: Task) {
        (**self).schedule_named(name, delay, task)
    }
}

struct Entry {
    task: Task,
    name: Option<&'static str>,
}

/// Deadline-ordered queue; ties fire in scheduling order.
struct TimerQueue<T> {
    heap: BinaryHeap<Reverse<(T, u64)>>,
    entries: HashMap<u64, Entry>,
    named: HashMap<&'static str, u64>,
    next_seq: u64,
}

impl<T: Ord + Copy> TimerQueue<T> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            entries: HashMap::new(),
            named: HashMap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, deadline: T, name: Option<&'static str>, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(name) = name {
            if let Some(previous) = self.named.insert(name, seq) {
                self.entries.remove(&previous);
            }
        }
        self.entries.insert(seq, Entry { task, name });
        self.heap.push(Reverse((deadline, seq)));
    }

    /// Drop heap slots whose entry was replaced by a named restart.
    fn purge_stale(&mut self) {
        while let Some(Reverse((_, seq))) = self.heap.peek().copied() {
            if self.entries.contains_key(&seq) {
                break;
            }
            self.heap.pop();
        }
    }

    fn next_deadline(&mut self) -> Option<T> {
        self.purge_stale();
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }

    fn pop_due(&mut self, now: T) -> Option<Task> {
        self.purge_stale();
        let Reverse((deadline, seq)) = self.heap.peek().copied()?;
        if deadline > now {
            return None;
        }
        self.heap.pop();
        let entry = self.entries.remove(&seq)?;
        if let Some(name) = entry.name {
            if self.named.get(name) == Some(&seq) {
                self.named.remove(name);
            }
        }
        Some(entry.task)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Run every task due at `now`, releasing the queue borrow before each task so
/// tasks may schedule more work.
fn drain_due<T: Ord + Copy>(queue: &RefCell<TimerQueue<T>>, now: T) -> usize {
    let mut ran = 0;
    loop {
        let task = queue.borrow_mut().pop_due(now);
        match task {
            Some(task) => {
                task();
                ran += 1;
            }
            None => break,
        }
    }
    ran
}

/// Deterministic scheduler driven by a virtual clock.
pub struct ManualScheduler {
    now: Cell<Duration>,
    queue: RefCell<TimerQueue<Duration>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            queue: RefCell::new(TimerQueue::new()),
        }
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.borrow_mut().next_deadline()
    }

    /// Move the clock forward by `by`, firing tasks in deadline order. Tasks
    /// scheduled by firing tasks run too if they fall inside the window.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;
        loop {
            let next = self.queue.borrow_mut().next_deadline();
            match next {
                Some(deadline) if deadline <= target => {
                    self.now.set(self.now.get().max(deadline));
                    ran += drain_due(&self.queue, self.now.get());
                }
                _ => break,
            }
        }
        self.now.set(target);
        ran
    }

    /// Fire everything, including work scheduled along the way.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(deadline) = self.next_deadline() {
            let by = deadline.saturating_sub(self.now.get());
            ran += self.advance(by);
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) {
        let deadline = self.now.get() + delay;
        self.queue.borrow_mut().push(deadline, None, task);
    }

    fn schedule_named(&self, name: &'static str, delay: Duration, task: Task) {
        let deadline = self.now.get() + delay;
        self.queue.borrow_mut().push(deadline, Some(name), task);
    }
}

/// Wall-clock scheduler pumped once per UI frame.
pub struct FrameScheduler {
    queue: RefCell<TimerQueue<Instant>>,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(TimerQueue::new()),
        }
    }

    pub fn run_due(&self, now: Instant) -> usize {
        drain_due(&self.queue, now)
    }

    /// Earliest pending deadline; the UI uses it to request a repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.borrow_mut().next_deadline()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Scheduler for FrameScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) {
        self.queue
            .borrow_mut()
            .push(Instant::now() + delay, None, task);
    }

    fn schedule_named(&self, name: &'static str, delay: Duration, task: Task) {
        self.queue
            .borrow_mut()
            .push(Instant::now() + delay, Some(name), task);
    }
}
