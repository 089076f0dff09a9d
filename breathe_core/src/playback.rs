// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback start policy.
//!
//! Browsers may refuse to start playback with sound until the user has
//! interacted with the page. [`start_playback`] requests the preferred mute
//! state, and if the platform refuses, retries once muted. Only a refusal of
//! the muted retry is an error.

use core::fmt;

use crate::media::{MediaControl, PlayRejected};

/// How playback started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackStart {
    /// Started on the first attempt.
    Started {
        /// The element's actual mute state, which may differ from the
        /// requested one.
        muted: bool,
    },
    /// The first attempt was refused; started muted on the retry.
    MutedFallback {
        /// Why the first attempt was refused.
        rejected: PlayRejected,
    },
}

impl PlaybackStart {
    /// Returns the mute state playback actually started with.
    #[must_use]
    pub const fn muted(&self) -> bool {
        match self {
            Self::Started { muted } => *muted,
            Self::MutedFallback { .. } => true,
        }
    }
}

/// Playback could not be started at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackError {
    /// Both the requested attempt and the muted retry were refused.
    MutedRetryFailed {
        /// Refusal of the first attempt.
        first: PlayRejected,
        /// Refusal of the muted retry.
        muted: PlayRejected,
    },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MutedRetryFailed { first, muted } => write!(
                f,
                "playback refused ({}), muted retry refused ({})",
                first.reason, muted.reason
            ),
        }
    }
}

impl core::error::Error for PlaybackError {}

/// Starts playback with `requested_muted`, falling back to a muted retry.
pub async fn start_playback<M: MediaControl>(
    media: &M,
    requested_muted: bool,
) -> Result<PlaybackStart, PlaybackError> {
    media.set_muted(requested_muted);
    let first = match media.play().await {
        Ok(()) => {
            return Ok(PlaybackStart::Started {
                muted: media.muted(),
            });
        }
        Err(rejected) => rejected,
    };

    media.set_muted(true);
    match media.play().await {
        Ok(()) => Ok(PlaybackStart::MutedFallback { rejected: first }),
        Err(muted) => Err(PlaybackError::MutedRetryFailed { first, muted }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};

    use super::*;
    use crate::media::MediaSource;

    /// Media whose `play()` results are scripted in order.
    struct Scripted {
        muted: Cell<bool>,
        force_muted: bool,
        results: RefCell<VecDeque<Result<(), PlayRejected>>>,
        plays: RefCell<Vec<bool>>,
    }

    impl Scripted {
        fn new(results: impl IntoIterator<Item = Result<(), PlayRejected>>) -> Self {
            Self {
                muted: Cell::new(false),
                force_muted: false,
                results: RefCell::new(results.into_iter().collect()),
                plays: RefCell::new(Vec::new()),
            }
        }
    }

    impl MediaSource for Scripted {
        fn current_time(&self) -> f64 {
            0.0
        }
        fn duration(&self) -> Option<f64> {
            Some(160.0)
        }
    }

    impl MediaControl for Scripted {
        fn muted(&self) -> bool {
            self.muted.get() || self.force_muted
        }
        fn set_muted(&self, muted: bool) {
            self.muted.set(muted);
        }
        fn play(&self) -> impl Future<Output = Result<(), PlayRejected>> {
            self.plays.borrow_mut().push(self.muted.get());
            let result = self
                .results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(PlayRejected::new("unscripted")));
            core::future::ready(result)
        }
    }

    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(out) => out,
            Poll::Pending => panic!("scripted futures are always ready"),
        }
    }

    fn refused() -> Result<(), PlayRejected> {
        Err(PlayRejected::new("NotAllowedError"))
    }

    #[test]
    fn starts_with_sound_when_allowed() {
        let media = Scripted::new([Ok(())]);
        let out = block_on(start_playback(&media, false));
        assert_eq!(out, Ok(PlaybackStart::Started { muted: false }));
        assert_eq!(*media.plays.borrow(), [false]);
    }

    #[test]
    fn reports_actual_mute_state() {
        let mut media = Scripted::new([Ok(())]);
        media.force_muted = true;
        let out = block_on(start_playback(&media, false));
        assert_eq!(
            out,
            Ok(PlaybackStart::Started { muted: true }),
            "platform forced mute must be reported"
        );
    }

    #[test]
    fn falls_back_to_muted() {
        let media = Scripted::new([refused(), Ok(())]);
        let out = block_on(start_playback(&media, false));
        let start = out.unwrap();
        assert!(matches!(start, PlaybackStart::MutedFallback { .. }));
        assert!(start.muted());
        assert!(media.muted());
        assert_eq!(*media.plays.borrow(), [false, true], "retry is muted");
    }

    #[test]
    fn muted_retry_failure_is_an_error() {
        let media = Scripted::new([refused(), Err(PlayRejected::new("AbortError"))]);
        let err = block_on(start_playback(&media, false)).unwrap_err();
        assert_eq!(
            err,
            PlaybackError::MutedRetryFailed {
                first: PlayRejected::new("NotAllowedError"),
                muted: PlayRejected::new("AbortError"),
            }
        );
        assert_eq!(
            alloc::format!("{err}"),
            "playback refused (NotAllowedError), muted retry refused (AbortError)"
        );
    }

    #[test]
    fn no_retry_after_success() {
        let media = Scripted::new([Ok(()), refused()]);
        let _ = block_on(start_playback(&media, true));
        assert_eq!(media.plays.borrow().len(), 1);
    }
}
