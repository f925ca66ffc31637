//! One authentication episode and its "authenticated" signal.
//!
//! Each episode owns a fresh watch channel, so a waiter holding the signal
//! of episode N can never observe the completion of episode N-1.

use tokio::sync::watch;

/// The in-flight side of an episode, held by the reconciler.
#[derive(Debug)]
pub(crate) struct Episode {
    generation: u64,
    done: watch::Sender<bool>,
}

/// The waiting side of an episode. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EpisodeSignal {
    generation: u64,
    done: watch::Receiver<bool>,
}

impl Episode {
    pub(crate) fn new(generation: u64) -> (Self, EpisodeSignal) {
        let (done, rx) = watch::channel(false);
        let signal = EpisodeSignal {
            generation,
            done: rx,
        };
        (Self { generation, done }, signal)
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Another waiter on this episode.
    pub(crate) fn signal(&self) -> EpisodeSignal {
        EpisodeSignal {
            generation: self.generation,
            done: self.done.subscribe(),
        }
    }

    /// Fire the signal. Consumes the episode, so it fires at most once.
    pub(crate) fn complete(self) {
        self.done.send_replace(true);
    }
}

impl EpisodeSignal {
    /// A signal that has already fired.
    pub(crate) fn completed(generation: u64) -> Self {
        let (_done, rx) = watch::channel(true);
        Self {
            generation,
            done: rx,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        *self.done.borrow()
    }

    /// Wait until the episode authenticates and return its generation.
    ///
    /// Also returns if the episode is abandoned on shutdown.
    pub async fn wait(mut self) -> u64 {
        let _ = self.done.wait_for(|done| *done).await;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_fires_on_complete() {
        let (episode, signal) = Episode::new(3);
        let joined = episode.signal();
        assert!(!signal.is_complete());

        episode.complete();
        assert!(joined.is_complete());
        assert_eq!(signal.wait().await, 3);
        assert_eq!(joined.wait().await, 3);
    }

    #[tokio::test]
    async fn test_completed_signal() {
        let signal = EpisodeSignal::completed(7);
        assert!(signal.is_complete());
        assert_eq!(signal.generation(), 7);
        assert_eq!(signal.wait().await, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_waits_until_complete() {
        let (episode, signal) = Episode::new(1);
        let waiter = tokio::spawn(signal.wait());

        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        assert!(!waiter.is_finished());

        episode.complete();
        assert_eq!(waiter.await.unwrap(), 1);
    }
}
