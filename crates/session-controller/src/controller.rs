//! Game Session Controller
//!
//! Orchestrates one play-through of any of the five modes: sequences
//! content, accumulates the session score, and on completion hands the
//! totals to the progression tracker and the ticket wallet. Only `finish`
//! commits anything to player progress; an abandoned session leaves no
//! trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use decision_engine::{evaluate_guess, value_spread, DecisionInstance, GuessOutcome};
use game_core::{GameError, GameMode, ImpactBatch, PlayerProgress, ScoreVector};
use progression::{add_xp, Ladder, LevelUp};
use reward_store::credit_tickets;

use crate::scoring::ScoringRules;
use crate::session::{ContentItem, PlayerResponse, Session, SessionState};

/// What one response produced.
#[derive(Debug, Clone)]
pub enum ResponseResult {
    Guess(GuessOutcome),
    Decision(ImpactBatch),
}

/// Result of feeding one response to `advance`.
#[derive(Debug, Clone)]
pub struct AdvanceOutcome {
    /// None when the time budget expired before the response was judged.
    pub result: Option<ResponseResult>,
    pub completed: bool,
    pub time_expired: bool,
}

/// Aggregated result of a finished session, returned for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub mode: GameMode,
    pub xp_awarded: u64,
    pub tickets_awarded: u64,
    pub level_ups: Vec<LevelUp>,
    pub correct: u32,
    pub answered: u32,
    pub time_expired: bool,
}

/// Per-player orchestrator. Enforces at most one open session: `start`
/// rejects a second session rather than silently abandoning the first.
pub struct GameSessionController {
    ladder: Ladder,
    scoring: ScoringRules,
    session_open: bool,
}

impl GameSessionController {
    pub fn new(ladder: Ladder, scoring: ScoringRules) -> Self {
        Self {
            ladder,
            scoring,
            session_open: false,
        }
    }

    pub fn has_open_session(&self) -> bool {
        self.session_open
    }

    /// Open a session bound to the given content queue and mode. The
    /// returned handle must come back through `finish` or `abandon`.
    pub fn start(
        &mut self,
        mode: GameMode,
        items: Vec<ContentItem>,
    ) -> Result<Session, GameError> {
        if self.session_open {
            return Err(GameError::SessionInProgress);
        }

        let started_at = Utc::now();
        let deadline = self
            .scoring
            .rule(mode)
            .time_budget
            .map(|budget| started_at + budget);

        self.session_open = true;
        tracing::info!(mode = mode.to_label(), items = items.len(), "session started");
        Ok(Session {
            mode,
            items,
            cursor: 0,
            score: ScoreVector::new(),
            correct: 0,
            answered: 0,
            started_at,
            deadline,
            time_expired: false,
            finished: false,
        })
    }

    /// Feed one player response to the session.
    pub fn advance(
        &self,
        session: &mut Session,
        response: PlayerResponse,
    ) -> Result<AdvanceOutcome, GameError> {
        self.advance_at(session, response, Utc::now())
    }

    /// `advance` against an explicit clock reading.
    pub fn advance_at(
        &self,
        session: &mut Session,
        response: PlayerResponse,
        now: DateTime<Utc>,
    ) -> Result<AdvanceOutcome, GameError> {
        if session.state() != SessionState::Active {
            return Err(GameError::UnexpectedResponse {
                expected: "no further responses, session is complete",
            });
        }

        // Time Attack: a blown budget forces completion regardless of
        // remaining content; the late response is not judged.
        if let Some(deadline) = session.deadline {
            if now > deadline {
                session.time_expired = true;
                tracing::info!(mode = session.mode.to_label(), "time budget expired");
                return Ok(AdvanceOutcome {
                    result: None,
                    completed: true,
                    time_expired: true,
                });
            }
        }

        let item = session
            .current_item()
            .cloned()
            .ok_or(GameError::UnexpectedResponse {
                expected: "no further responses, session is complete",
            })?;

        let result = match (item, response) {
            (ContentItem::Question(question), PlayerResponse::Guess(guess)) => {
                let outcome = evaluate_guess(&question, guess);
                if outcome.correct {
                    let rule = self.scoring.rule(session.mode);
                    let points = if rule.spread_scored {
                        // Continuous scoring: a bigger company/industry gap
                        // was a more obvious call, worth up to double.
                        let industry = question.industry_value.as_number()?;
                        let spread = value_spread(&question)?;
                        let relative = if industry.abs() > f64::EPSILON {
                            (spread / industry.abs()).abs().min(1.0)
                        } else {
                            0.0
                        };
                        rule.points_per_correct * (1.0 + relative)
                    } else {
                        rule.points_per_correct
                    };
                    session.score.add(&question.metric, points);
                    session.correct += 1;
                }
                ResponseResult::Guess(outcome)
            }
            (ContentItem::Decision(decision), PlayerResponse::Choice { option_id }) => {
                let mut instance = DecisionInstance::new(&decision);
                let batch = instance.select_option(&option_id, &mut session.score)?;
                ResponseResult::Decision(batch)
            }
            (ContentItem::Question(_), PlayerResponse::Choice { .. }) => {
                return Err(GameError::UnexpectedResponse { expected: "a good/bad guess" })
            }
            (ContentItem::Decision(_), PlayerResponse::Guess(_)) => {
                return Err(GameError::UnexpectedResponse { expected: "an option choice" })
            }
        };

        session.answered += 1;
        session.cursor += 1;

        Ok(AdvanceOutcome {
            result: Some(result),
            completed: session.state() == SessionState::Complete,
            time_expired: false,
        })
    }

    /// Commit a completed session: convert the score vector into XP and
    /// ticket deltas via the mode's scoring rule, apply both to progress,
    /// and return the aggregated level-up events. A failed finish leaves
    /// the session playable; a successful one marks it terminal.
    pub fn finish(
        &mut self,
        session: &mut Session,
        progress: &mut PlayerProgress,
    ) -> Result<SessionOutcome, GameError> {
        match session.state() {
            SessionState::Active => {
                return Err(GameError::SessionNotComplete {
                    remaining: session.remaining(),
                });
            }
            SessionState::Finished => {
                return Err(GameError::UnexpectedResponse {
                    expected: "a session that has not already been finished",
                });
            }
            SessionState::Complete => {}
        }

        let rule = self.scoring.rule(session.mode);
        let points = session.score.total().max(0.0);

        let mut xp = (points * rule.xp_per_point).round() as i64;
        if session.remaining() == 0 {
            xp += rule.completion_bonus_xp as i64;
        }
        let tickets = (points * rule.tickets_per_point).round().max(0.0) as u64;

        let level_ups = add_xp(&self.ladder, progress, xp)?;
        credit_tickets(progress, tickets);
        for (metric, total) in session.score.iter() {
            progress.lifetime_scores.add(metric, *total);
        }

        session.finished = true;
        self.session_open = false;
        tracing::info!(
            mode = session.mode.to_label(),
            xp,
            tickets,
            levels = level_ups.len(),
            "session finished"
        );

        Ok(SessionOutcome {
            mode: session.mode,
            xp_awarded: xp as u64,
            tickets_awarded: tickets,
            level_ups,
            correct: session.correct,
            answered: session.answered,
            time_expired: session.time_expired,
        })
    }

    /// Discard a session without committing any XP or ticket effects.
    pub fn abandon(&mut self, session: Session) {
        tracing::debug!(mode = session.mode.to_label(), "session abandoned");
        self.session_open = false;
    }
}
