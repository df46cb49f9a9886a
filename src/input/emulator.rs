// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serializing front end for an injector backend.
//!
//! Every sequence handed to [`KeyEmulator::submit`] runs to completion before
//! the next one starts, so sequences from overlapping dispatches never
//! interleave.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use super::injector::InputInjector;
use super::operation::KeyOperation;
use crate::error::{Error, Result};

struct Submission {
    operations: Vec<KeyOperation>,
    done: oneshot::Sender<Result<()>>,
}

/// Completion of one submitted sequence.
pub struct Completion {
    rx: oneshot::Receiver<Result<()>>,
}

impl Completion {
    fn ready(result: Result<()>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    /// Wait until the worker has performed or abandoned the sequence.
    pub async fn wait(self) -> Result<()> {
        self.rx.await.map_err(|_| Error::EmulatorClosed)?
    }
}

/// Handle to the key emulator worker. Cheap to clone.
#[derive(Clone)]
pub struct KeyEmulator {
    tx: mpsc::UnboundedSender<Submission>,
    backend: &'static str,
}

impl KeyEmulator {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(injector: Arc<dyn InputInjector>) -> Self {
        let backend = injector.backend_name();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(injector, rx));
        debug!("Key emulator started on {}", backend);
        Self { tx, backend }
    }

    /// Name of the backend the worker drives.
    pub fn backend_name(&self) -> &'static str {
        self.backend
    }

    /// Queue a sequence without waiting for it. Sequences run in the order
    /// they were submitted.
    pub fn submit(&self, operations: Vec<KeyOperation>) -> Result<Completion> {
        if operations.is_empty() {
            return Ok(Completion::ready(Ok(())));
        }

        let (done, rx) = oneshot::channel();
        self.tx
            .send(Submission { operations, done })
            .map_err(|_| Error::EmulatorClosed)?;
        Ok(Completion { rx })
    }

    /// Queue a sequence and wait until every operation in it was performed.
    pub async fn send(&self, operations: Vec<KeyOperation>) -> Result<()> {
        self.submit(operations)?.wait().await
    }
}

async fn run(injector: Arc<dyn InputInjector>, mut rx: mpsc::UnboundedReceiver<Submission>) {
    while let Some(submission) = rx.recv().await {
        let result = perform(&injector, &submission.operations).await;
        if let Err(e) = &result {
            warn!("Key sequence aborted: {}", e);
        }
        // The submitter may have stopped waiting.
        let _ = submission.done.send(result);
    }
    debug!("Key emulator stopped");
}

async fn perform(injector: &Arc<dyn InputInjector>, operations: &[KeyOperation]) -> Result<()> {
    for (index, operation) in operations.iter().copied().enumerate() {
        trace!("Key {} of {}: {:?}", index + 1, operations.len(), operation);

        let backend = Arc::clone(injector);
        tokio::task::spawn_blocking(move || backend.apply(&operation))
            .await
            .map_err(|e| Error::Injection(e.to_string()))?
            .map_err(|e| Error::Injection(format!("{:#}", e)))?;

        if !operation.delay_after.is_zero() {
            tokio::time::sleep(operation.delay_after).await;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{key_presses, space_operations, KeyCode, RecordingInjector};
    use std::time::Duration;

    #[tokio::test]
    async fn test_send_in_order() {
        let injector = Arc::new(RecordingInjector::new());
        let emulator = KeyEmulator::spawn(injector.clone());

        emulator
            .send(key_presses(&[KeyCode::Three, KeyCode::Eight, KeyCode::One]))
            .await
            .unwrap();

        assert_eq!(
            injector.keys(),
            vec![KeyCode::Three, KeyCode::Eight, KeyCode::One]
        );
    }

    #[tokio::test]
    async fn test_submissions_run_in_submission_order() {
        let injector = Arc::new(RecordingInjector::new());
        let emulator = KeyEmulator::spawn(injector.clone());

        let first = emulator.submit(key_presses(&[KeyCode::F1])).unwrap();
        let second = emulator.submit(key_presses(&[KeyCode::One, KeyCode::Two])).unwrap();
        second.wait().await.unwrap();
        first.wait().await.unwrap();

        assert_eq!(
            injector.keys(),
            vec![KeyCode::F1, KeyCode::One, KeyCode::Two]
        );
    }

    #[tokio::test]
    async fn test_empty_sequence_is_noop() {
        let injector = Arc::new(RecordingInjector::new());
        let emulator = KeyEmulator::spawn(injector.clone());

        emulator.send(Vec::new()).await.unwrap();
        assert!(injector.keys().is_empty());
    }

    #[tokio::test]
    async fn test_failure_abandons_rest_without_retry() {
        let injector = Arc::new(RecordingInjector::failing_after(1));
        let emulator = KeyEmulator::spawn(injector.clone());

        let result = emulator
            .send(key_presses(&[KeyCode::One, KeyCode::Two, KeyCode::Three]))
            .await;

        assert!(matches!(result, Err(Error::Injection(_))));
        assert_eq!(injector.keys(), vec![KeyCode::One]);
    }

    #[tokio::test]
    async fn test_concurrent_sequences_do_not_interleave() {
        let injector = Arc::new(RecordingInjector::new());
        let emulator = KeyEmulator::spawn(injector.clone());
        let delay = Duration::from_millis(2);

        let first: Vec<_> = key_presses(&[KeyCode::One, KeyCode::Two, KeyCode::Three])
            .into_iter()
            .map(|op| op.with_delay(delay))
            .collect();
        let second: Vec<_> = key_presses(&[KeyCode::F1, KeyCode::F2, KeyCode::F3])
            .into_iter()
            .map(|op| op.with_delay(delay))
            .collect();

        let (a, b) = tokio::join!(emulator.send(first), emulator.send(second));
        a.unwrap();
        b.unwrap();

        let keys = injector.keys();
        assert_eq!(keys.len(), 6);
        let (head, tail) = keys.split_at(3);
        let one_two_three = [KeyCode::One, KeyCode::Two, KeyCode::Three];
        let f1_f2_f3 = [KeyCode::F1, KeyCode::F2, KeyCode::F3];
        assert!(
            (head == one_two_three && tail == f1_f2_f3)
                || (head == f1_f2_f3 && tail == one_two_three),
            "sequences interleaved: {:?}",
            keys
        );
    }

    #[tokio::test]
    async fn test_waits_delay_after_each_operation() {
        let injector = Arc::new(RecordingInjector::new());
        let emulator = KeyEmulator::spawn(injector.clone());
        let delay = Duration::from_millis(20);
        let spaced = space_operations(
            &key_presses(&[KeyCode::Three, KeyCode::Eight, KeyCode::One]),
            delay,
        );

        let started = tokio::time::Instant::now();
        emulator.send(spaced).await.unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= delay * 3, "finished after only {:?}", elapsed);
        assert_eq!(injector.keys().len(), 3);
    }
}
