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

//! Event processing and command dispatch.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::commands::ActionDispatcher;
use crate::grammar::Grammar;
use crate::input::Completion;
use crate::semantics::{self, SemanticResult};
use crate::state::AppState;

/// Events produced by a recognizer.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// The recognizer matched the grammar and produced a semantic result.
    Recognized(SemanticResult),
    /// Raw text to be interpreted against the grammar.
    Utterance(String),
    /// Speech that matched nothing.
    Rejected(String),
    /// Turn dispatching on or off.
    SetListening(bool),
}

/// Turns recognition events into key sequences.
pub struct EventProcessor {
    grammar: Arc<Grammar>,
    dispatcher: ActionDispatcher,
    state: Arc<AppState>,
}

impl EventProcessor {
    pub fn new(grammar: Arc<Grammar>, dispatcher: ActionDispatcher, state: Arc<AppState>) -> Self {
        Self {
            grammar,
            dispatcher,
            state,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Process a single event. Returns the completion of the queued key
    /// sequence, if one was dispatched.
    pub fn process_event(&self, event: RecognitionEvent) -> Result<Option<Completion>> {
        match event {
            RecognitionEvent::Recognized(result) => self.handle_result(&result),
            RecognitionEvent::Utterance(text) => match self.grammar.interpret(&text) {
                Some(result) => {
                    debug!("Utterance '{}' interpreted as {:?}", text, result);
                    self.handle_result(&result)
                }
                None => {
                    self.reject(text);
                    Ok(None)
                }
            },
            RecognitionEvent::Rejected(text) => {
                self.reject(text);
                Ok(None)
            }
            RecognitionEvent::SetListening(listening) => {
                self.state.set_listening(listening);
                info!("Listening {}", if listening { "enabled" } else { "disabled" });
                Ok(None)
            }
        }
    }

    fn handle_result(&self, result: &SemanticResult) -> Result<Option<Completion>> {
        if !self.state.is_listening() {
            debug!("Not listening, ignoring {:?}", result);
            return Ok(None);
        }

        if let Some(command) = semantics::parse_scalar(crate::grammar::COMMAND_FIELD, result) {
            self.state.set_last_command(command);
        }

        let completion = self.dispatcher.dispatch(result)?;
        Ok(Some(completion))
    }

    fn reject(&self, text: String) {
        info!("No command matched '{}'", text);
        self.state.set_last_rejected(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::catalog;
    use crate::input::{KeyCode, KeyEmulator, RecordingInjector};
    use std::time::Duration;

    fn processor(state: Arc<AppState>) -> (EventProcessor, Arc<RecordingInjector>) {
        let (grammar, registry) = catalog::assemble("en-US", 10).unwrap();
        let recorder = Arc::new(RecordingInjector::new());
        let emulator = KeyEmulator::spawn(recorder.clone());
        let dispatcher = ActionDispatcher::new(Arc::new(registry), emulator, Duration::ZERO);
        (
            EventProcessor::new(Arc::new(grammar), dispatcher, state),
            recorder,
        )
    }

    #[tokio::test]
    async fn test_utterance_is_dispatched() {
        let (processor, recorder) = processor(AppState::new());

        let completion = processor
            .process_event(RecognitionEvent::Utterance("two flank left".into()))
            .unwrap()
            .unwrap();
        completion.wait().await.unwrap();

        assert_eq!(recorder.keys(), vec![KeyCode::F2, KeyCode::One, KeyCode::Four]);
        assert_eq!(
            processor.state().get_last_command().as_deref(),
            Some("FLANKLEFT")
        );
    }

    #[tokio::test]
    async fn test_recognized_result_is_dispatched() {
        let (processor, recorder) = processor(AppState::new());
        let mut result = SemanticResult::new();
        result.insert("command", "WATCH").insert("directObject", "WEST");

        let completion = processor
            .process_event(RecognitionEvent::Recognized(result))
            .unwrap()
            .unwrap();
        completion.wait().await.unwrap();

        assert_eq!(
            recorder.keys(),
            vec![KeyCode::Three, KeyCode::Eight, KeyCode::Seven]
        );
    }

    #[tokio::test]
    async fn test_not_listening_does_nothing() {
        let (processor, recorder) = processor(AppState::with_listening(false));

        let completion = processor
            .process_event(RecognitionEvent::Utterance("advance".into()))
            .unwrap();

        assert!(completion.is_none());
        assert!(recorder.keys().is_empty());
        assert!(processor.state().get_last_command().is_none());
    }

    #[tokio::test]
    async fn test_set_listening_toggles_dispatch() {
        let (processor, recorder) = processor(AppState::new());

        processor
            .process_event(RecognitionEvent::SetListening(false))
            .unwrap();
        assert!(processor
            .process_event(RecognitionEvent::Utterance("advance".into()))
            .unwrap()
            .is_none());

        processor
            .process_event(RecognitionEvent::SetListening(true))
            .unwrap();
        processor
            .process_event(RecognitionEvent::Utterance("advance".into()))
            .unwrap()
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(recorder.keys(), vec![KeyCode::One, KeyCode::Two]);
    }

    #[tokio::test]
    async fn test_unmatched_utterance_is_rejected() {
        let (processor, recorder) = processor(AppState::new());

        let completion = processor
            .process_event(RecognitionEvent::Utterance("make me a sandwich".into()))
            .unwrap();

        assert!(completion.is_none());
        assert!(recorder.keys().is_empty());
        assert_eq!(
            processor.state().get_last_rejected().as_deref(),
            Some("make me a sandwich")
        );
    }
}
