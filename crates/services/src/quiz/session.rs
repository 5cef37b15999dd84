use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{ActivityRecord, Feedback, KnowledgeVector, Question};
use storage::repository::ActivityLogStore;

use super::state::{QuizAction, QuizSnapshot, QuizStatus, SessionState};
use crate::Clock;
use crate::backend::QuizBackend;
use crate::error::{QuizError, SessionFault};

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub feedback: Feedback,
    pub knowledge: KnowledgeVector,
    pub record: ActivityRecord,
    /// False when the backend accepted the answer but the local history write failed.
    pub recorded: bool,
}

/// Drives one question at a time through load → answer → feedback.
///
/// The handle is cheap to clone; clones share the same state. The state lock
/// is only held between awaits, so a second `submit` issued while the first is
/// in flight observes `Submitting` and is rejected.
#[derive(Clone)]
pub struct QuizSession {
    clock: Clock,
    backend: Arc<dyn QuizBackend>,
    activity: Arc<dyn ActivityLogStore>,
    state: Arc<Mutex<SessionState>>,
}

impl QuizSession {
    /// Creates an idle session. Call [`QuizSession::load_question`] (or use
    /// [`QuizSession::start`]) to fetch the first question.
    #[must_use]
    pub fn new(
        clock: Clock,
        backend: Arc<dyn QuizBackend>,
        activity: Arc<dyn ActivityLogStore>,
    ) -> Self {
        Self {
            clock,
            backend,
            activity,
            state: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    /// Creates a session and immediately loads the first question.
    ///
    /// A failed first load leaves the session `Idle` with the fault available
    /// from [`QuizSession::last_error`].
    pub async fn start(
        clock: Clock,
        backend: Arc<dyn QuizBackend>,
        activity: Arc<dyn ActivityLogStore>,
    ) -> Self {
        let session = Self::new(clock, backend, activity);
        if let Err(err) = session.load_question().await {
            tracing::warn!(error = %err, "initial question load failed");
        }
        session
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.lock().status
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn knowledge(&self) -> KnowledgeVector {
        self.lock().knowledge.clone()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<SessionFault> {
        self.lock().last_error.clone()
    }

    /// Fetch the next question, replacing any unanswered one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` while a load or submit is in
    /// flight, `QuizError::Backend` when the fetch fails (the session
    /// drops back to `Idle`), or `QuizError::Stale` if the session was closed
    /// while the request was in flight.
    pub async fn load_question(&self) -> Result<Question, QuizError> {
        let generation = {
            let mut state = self.lock();
            match state.status {
                QuizStatus::Idle | QuizStatus::AwaitingAnswer | QuizStatus::FeedbackShown => {}
                from => {
                    return Err(QuizError::InvalidTransition {
                        from,
                        action: QuizAction::Load,
                    });
                }
            }
            state.status = QuizStatus::Loading;
            state.generation
        };

        let result = self.backend.fetch_question().await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!("discarding question for a closed session");
            return Err(QuizError::Stale);
        }

        match result {
            Ok(round) => {
                tracing::debug!(
                    qid = round.question.id().value(),
                    topic = round.question.topic().value(),
                    "question loaded"
                );
                state.question = Some(round.question.clone());
                state.selection = None;
                state.feedback = None;
                state.knowledge.replace(round.knowledge);
                state.last_error = None;
                state.status = QuizStatus::AwaitingAnswer;
                Ok(round.question)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch question");
                state.clear_round();
                state.last_error = Some(SessionFault::from(&err));
                state.status = QuizStatus::Idle;
                Err(err.into())
            }
        }
    }

    /// Same as [`QuizSession::load_question`]; reads better after feedback.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::load_question`].
    pub async fn next_question(&self) -> Result<Question, QuizError> {
        self.load_question().await
    }

    /// Mark `index` as the chosen option.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside `AwaitingAnswer` and
    /// `QuizError::AnswerOutOfRange` for an index past the last option.
    pub fn select_answer(&self, index: usize) -> Result<(), QuizError> {
        let mut state = self.lock();
        if state.status != QuizStatus::AwaitingAnswer {
            return Err(QuizError::InvalidTransition {
                from: state.status,
                action: QuizAction::Select,
            });
        }
        let Some(question) = state.question.as_ref() else {
            return Err(QuizError::AnswerOutOfRange { index, len: 0 });
        };
        if !question.is_valid_answer(index) {
            return Err(QuizError::AnswerOutOfRange {
                index,
                len: question.option_count(),
            });
        }
        state.selection = Some(index);
        Ok(())
    }

    /// Send the selected answer and record the outcome.
    ///
    /// On success the feedback and knowledge vector are stored, exactly one
    /// activity record is appended and the session moves to `FeedbackShown`.
    /// On a backend failure the session returns to `AwaitingAnswer` with the
    /// selection kept and nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside `AwaitingAnswer` (including
    /// while another submit is in flight), `QuizError::NoSelection` without a
    /// selection, `QuizError::Backend` when the request fails, or
    /// `QuizError::Stale` if the session was closed meanwhile.
    pub async fn submit(&self) -> Result<SubmitOutcome, QuizError> {
        let (generation, question, answer) = {
            let mut state = self.lock();
            if state.status != QuizStatus::AwaitingAnswer {
                return Err(QuizError::InvalidTransition {
                    from: state.status,
                    action: QuizAction::Submit,
                });
            }
            let Some(answer) = state.selection else {
                return Err(QuizError::NoSelection);
            };
            let Some(question) = state.question.clone() else {
                return Err(QuizError::InvalidTransition {
                    from: state.status,
                    action: QuizAction::Submit,
                });
            };
            state.status = QuizStatus::Submitting;
            (state.generation, question, answer)
        };

        let verdict = match self.backend.submit_answer(answer).await {
            Ok(verdict) => verdict,
            Err(err) => {
                let mut state = self.lock();
                if state.generation != generation {
                    return Err(QuizError::Stale);
                }
                tracing::warn!(error = %err, answer, "failed to submit answer");
                state.last_error = Some(SessionFault::from(&err));
                state.status = QuizStatus::AwaitingAnswer;
                return Err(err.into());
            }
        };

        if self.lock().generation != generation {
            tracing::debug!("discarding verdict for a closed session");
            return Err(QuizError::Stale);
        }

        let Some(record) = ActivityRecord::from_answer(
            &question,
            answer,
            &verdict.feedback,
            self.clock.activity_timestamp(),
        ) else {
            let mut state = self.lock();
            if state.generation == generation {
                state.status = QuizStatus::AwaitingAnswer;
            }
            return Err(QuizError::AnswerOutOfRange {
                index: answer,
                len: question.option_count(),
            });
        };
        let appended = self.activity.append(record.clone()).await;

        let mut state = self.lock();
        let recorded = match appended {
            Ok(()) => {
                state.last_error = None;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to record answer in activity log");
                state.last_error = Some(SessionFault::from(&err));
                false
            }
        };

        if state.generation != generation {
            tracing::debug!("answer recorded after the session was closed");
            return Err(QuizError::Stale);
        }

        state.feedback = Some(verdict.feedback.clone());
        state.knowledge.replace(verdict.knowledge.clone());
        state.status = QuizStatus::FeedbackShown;
        tracing::info!(correct = verdict.feedback.correct, answer, "answer submitted");

        Ok(SubmitOutcome {
            feedback: verdict.feedback,
            knowledge: verdict.knowledge,
            record,
            recorded,
        })
    }

    /// Detach the session from its view.
    ///
    /// In-flight responses issued before this call are discarded when they
    /// arrive. The session can be reused by loading a new question.
    pub fn close(&self) {
        let mut state = self.lock();
        state.generation = state.generation.wrapping_add(1);
        state.clear_round();
        state.status = QuizStatus::Idle;
    }
}
