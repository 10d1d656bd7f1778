use std::time::Duration;
use crate::format;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Capability to run the engine's tick after a delay. Once `cancel` returns,
/// the token must never produce an effective tick again.
pub trait Scheduler {
	fn schedule(&mut self, delay: Duration) -> TickToken;
	fn cancel(&mut self, token: TickToken);
}

/// Identifies one scheduled tick, so a fired delay can be matched against
/// the tick the engine is actually waiting for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TickToken(u64);

impl TickToken {
	pub fn new(id: u64) -> TickToken {
		TickToken(id)
	}
}

/// The state pushed to subscribers after every mutation.
#[derive(Clone, PartialEq, Debug)]
pub struct Snapshot {
	pub total: u64,
	pub remaining: u64,
	pub progress: f32,
	pub text: String,
	pub running: bool,
}

pub struct Subscription(u64);

/// A countdown over whole seconds. The engine owns all timer state; it is
/// mutated only through `configure`, `toggle_start`, `reset` and `tick`.
pub struct TimerEngine<S> {
	scheduler: S,
	total: u64,
	remaining: u64,
	running: bool,
	finished: bool,
	pending: Option<TickToken>,
	listeners: Vec<(u64, Box<dyn FnMut(&Snapshot)>)>,
	next_sub: u64,
}

impl<S: Scheduler> TimerEngine<S> {
	pub fn new(scheduler: S) -> Self {
		TimerEngine {
			scheduler,
			total: 0,
			remaining: 0,
			running: false,
			finished: false,
			pending: None,
			listeners: Vec::new(),
			next_sub: 0,
		}
	}

	/// Replaces the configured duration and re-arms the full countdown.
	pub fn configure(&mut self, hours: u64, minutes: u64, seconds: u64) {
		self.cancel_pending();
		self.running = false;
		self.finished = false;
		self.total = hours * 3600 + minutes * 60 + seconds;
		self.remaining = self.total;
		self.notify();
	}

	/// Starts ticking, or pauses without touching the remaining time.
	pub fn toggle_start(&mut self) {
		if self.running {
			self.running = false;
			self.cancel_pending();
		} else {
			self.running = true;
			self.finished = false;
			self.pending = Some(self.scheduler.schedule(TICK_INTERVAL));
		}
		self.notify();
	}

	pub fn reset(&mut self) {
		self.cancel_pending();
		self.running = false;
		self.finished = false;
		self.remaining = self.total;
		self.notify();
	}

	/// Advances the countdown by one second. Called when a scheduled delay
	/// fires; a tick that was cancelled or superseded in the meantime does
	/// not match `pending` and is ignored.
	pub fn tick(&mut self, token: TickToken) {
		if !self.running || self.pending != Some(token) {
			return;
		}
		self.pending = None;
		if self.remaining > 0 {
			self.remaining -= 1;
		}
		if self.remaining == 0 {
			self.scheduler.cancel(token);
			self.running = false;
			self.finished = true;
		} else {
			self.pending = Some(self.scheduler.schedule(TICK_INTERVAL));
		}
		self.notify();
	}

	/// Registers a listener invoked after every state mutation, in
	/// insertion order.
	pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> Subscription {
		self.next_sub += 1;
		self.listeners.push((self.next_sub, Box::new(listener)));
		Subscription(self.next_sub)
	}

	pub fn unsubscribe(&mut self, subscription: Subscription) {
		self.listeners.retain(|(id, _)| *id != subscription.0);
	}

	pub fn running(&self) -> bool {
		self.running
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			total: self.total,
			remaining: self.remaining,
			progress: if self.total == 0 {
				0.0
			} else {
				self.remaining as f32 / self.total as f32
			},
			text: if self.finished {
				format::DONE_TEXT.into()
			} else {
				format::clock(self.remaining)
			},
			running: self.running,
		}
	}

	fn cancel_pending(&mut self) {
		if let Some(token) = self.pending.take() {
			self.scheduler.cancel(token);
		}
	}

	fn notify(&mut self) {
		let snapshot = self.snapshot();
		for (_, listener) in &mut self.listeners {
			listener(&snapshot);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;
	use super::*;

	#[derive(Default)]
	struct SchedulerLog {
		counter: u64,
		scheduled: Vec<TickToken>,
		cancelled: Vec<TickToken>,
	}

	#[derive(Clone, Default)]
	struct TestScheduler(Rc<RefCell<SchedulerLog>>);

	impl TestScheduler {
		fn last(&self) -> TickToken {
			*self.0.borrow().scheduled.last().expect("nothing scheduled")
		}

		fn cancelled(&self) -> Vec<TickToken> {
			self.0.borrow().cancelled.clone()
		}
	}

	impl Scheduler for TestScheduler {
		fn schedule(&mut self, _delay: Duration) -> TickToken {
			let mut log = self.0.borrow_mut();
			log.counter += 1;
			let token = TickToken::new(log.counter);
			log.scheduled.push(token);
			token
		}

		fn cancel(&mut self, token: TickToken) {
			self.0.borrow_mut().cancelled.push(token);
		}
	}

	fn engine() -> (TimerEngine<TestScheduler>, TestScheduler) {
		let scheduler = TestScheduler::default();
		(TimerEngine::new(scheduler.clone()), scheduler)
	}

	#[test]
	fn fresh_engine_is_idle() {
		let (engine, _) = engine();
		let snapshot = engine.snapshot();
		assert_eq!(0, snapshot.total);
		assert_eq!(0, snapshot.remaining);
		assert_eq!(0.0, snapshot.progress);
		assert_eq!("00:00:00", snapshot.text);
		assert!(!snapshot.running);
	}

	#[test]
	fn configure_computes_total() {
		let (mut engine, _) = engine();
		engine.configure(1, 1, 1);
		let snapshot = engine.snapshot();
		assert_eq!(3661, snapshot.total);
		assert_eq!(3661, snapshot.remaining);
		assert_eq!(1.0, snapshot.progress);
		assert_eq!("01:01:01", snapshot.text);
		assert!(!snapshot.running);
	}

	#[test]
	fn configure_while_running_stops_and_rearms() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 20);
		engine.toggle_start();
		engine.tick(scheduler.last());
		engine.configure(0, 0, 5);
		let snapshot = engine.snapshot();
		assert_eq!(5, snapshot.remaining);
		assert!(!snapshot.running);
		assert!(!scheduler.cancelled().is_empty());
	}

	#[test]
	fn pause_and_resume_preserve_remaining() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 5, 0);
		engine.toggle_start();
		engine.tick(scheduler.last());
		engine.tick(scheduler.last());
		engine.toggle_start();
		let paused = engine.snapshot();
		assert_eq!(298, paused.remaining);
		assert!(!paused.running);
		assert_eq!("00:04:58", paused.text);
		engine.toggle_start();
		assert_eq!(298, engine.snapshot().remaining);
	}

	#[test]
	fn toggle_twice_without_ticks_changes_nothing() {
		let (mut engine, _) = engine();
		engine.configure(0, 0, 30);
		engine.toggle_start();
		engine.toggle_start();
		let snapshot = engine.snapshot();
		assert_eq!(30, snapshot.remaining);
		assert!(!snapshot.running);
	}

	#[test]
	fn ticks_decrement_by_one() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 5);
		engine.toggle_start();
		for expected in (1..5).rev() {
			engine.tick(scheduler.last());
			let snapshot = engine.snapshot();
			assert_eq!(expected, snapshot.remaining);
			assert!(snapshot.running);
		}
	}

	#[test]
	fn countdown_completes() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 2);
		engine.toggle_start();
		engine.tick(scheduler.last());
		engine.tick(scheduler.last());
		let snapshot = engine.snapshot();
		assert_eq!(0, snapshot.remaining);
		assert!(!snapshot.running);
		assert_eq!("DONE!", snapshot.text);
		assert!(!scheduler.cancelled().is_empty());
	}

	#[test]
	fn zero_duration_completes_on_first_tick() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 0);
		engine.toggle_start();
		assert!(engine.running());
		engine.tick(scheduler.last());
		let snapshot = engine.snapshot();
		assert_eq!("DONE!", snapshot.text);
		assert_eq!(0.0, snapshot.progress);
		assert!(!snapshot.running);
	}

	#[test]
	fn reset_restores_full_duration() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 1, 40);
		engine.toggle_start();
		engine.tick(scheduler.last());
		engine.reset();
		let snapshot = engine.snapshot();
		assert_eq!(100, snapshot.remaining);
		assert_eq!(1.0, snapshot.progress);
		assert_eq!("00:01:40", snapshot.text);
		assert!(!snapshot.running);
	}

	#[test]
	fn reset_is_idempotent() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 10);
		engine.toggle_start();
		engine.tick(scheduler.last());
		engine.reset();
		let once = engine.snapshot();
		engine.reset();
		assert_eq!(once, engine.snapshot());
	}

	#[test]
	fn reset_clears_completion_marker() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 1);
		engine.toggle_start();
		engine.tick(scheduler.last());
		assert_eq!("DONE!", engine.snapshot().text);
		engine.reset();
		assert_eq!("00:00:01", engine.snapshot().text);
	}

	#[test]
	fn stale_tick_after_reset_is_ignored() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 10);
		engine.toggle_start();
		let stale = scheduler.last();
		engine.reset();
		engine.tick(stale);
		let snapshot = engine.snapshot();
		assert_eq!(10, snapshot.remaining);
		assert!(!snapshot.running);
	}

	#[test]
	fn superseded_tick_is_ignored() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 10);
		engine.toggle_start();
		let stale = scheduler.last();
		engine.toggle_start();
		engine.toggle_start();
		engine.tick(stale);
		assert_eq!(10, engine.snapshot().remaining);
		assert!(engine.running());
		engine.tick(scheduler.last());
		assert_eq!(9, engine.snapshot().remaining);
	}

	#[test]
	fn progress_tracks_remaining() {
		let (mut engine, scheduler) = engine();
		engine.configure(0, 0, 4);
		engine.toggle_start();
		for _ in 0..4 {
			engine.tick(scheduler.last());
			let snapshot = engine.snapshot();
			assert!(snapshot.progress >= 0.0 && snapshot.progress <= 1.0);
			assert_eq!(snapshot.remaining as f32 / 4.0, snapshot.progress);
		}
	}

	#[test]
	fn subscribers_run_in_insertion_order() {
		let (mut engine, _) = engine();
		let order = Rc::new(RefCell::new(Vec::new()));
		let first = order.clone();
		engine.subscribe(move |_| first.borrow_mut().push(1));
		let second = order.clone();
		engine.subscribe(move |_| second.borrow_mut().push(2));
		engine.configure(0, 0, 3);
		assert_eq!(&[1, 2], &order.borrow()[..]);
	}

	#[test]
	fn subscribers_see_every_mutation() {
		let (mut engine, scheduler) = engine();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		engine.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
		engine.configure(0, 0, 2);
		engine.toggle_start();
		engine.tick(scheduler.last());
		engine.tick(scheduler.last());
		let seen = seen.borrow();
		assert_eq!(4, seen.len());
		assert_eq!(2, seen[0].remaining);
		assert!(seen[1].running);
		assert_eq!(1, seen[2].remaining);
		assert_eq!("DONE!", seen[3].text);
	}

	#[test]
	fn unsubscribed_listener_stays_silent() {
		let (mut engine, _) = engine();
		let count = Rc::new(RefCell::new(0));
		let sink = count.clone();
		let subscription = engine.subscribe(move |_| *sink.borrow_mut() += 1);
		engine.configure(0, 0, 3);
		engine.unsubscribe(subscription);
		engine.reset();
		assert_eq!(1, *count.borrow());
	}
}
