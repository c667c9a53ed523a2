/* src/tick.rs */

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

/// A self-re-arming one-shot timer driving periodic refresh.
///
/// On each expiry the callback future is spawned as an independent task
/// and the timer immediately re-arms for another period, so a slow reload
/// never delays the schedule. There is no cycle limit; the loop runs until
/// the returned handle is aborted.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
	period: Duration,
}

impl Ticker {
	pub fn new(period: Duration) -> Self {
		Self { period }
	}

	/// Spawns the timer loop, producing one tick task per elapsed period.
	pub fn spawn<F, Fut>(self, mut tick: F) -> AbortHandle
	where
		F: FnMut() -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		tokio::spawn(async move {
			loop {
				tokio::time::sleep(self.period).await;
				tokio::spawn(tick());
			}
		})
		.abort_handle()
	}
}
