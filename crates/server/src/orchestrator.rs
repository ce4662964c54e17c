//! # Deck Orchestration
//!
//! This module coordinates loading a deck and running a swipe session:
//! 1. Build the user context (interests, then position)
//! 2. Fetch candidate pods
//! 3. Apply filters and compute card annotations
//! 4. Hand the surviving pods to a `SwipeQueue`
//! 5. Route every decision through the `DecisionDispatcher`
//!
//! Fetch failures never abort a load: they are logged and the user gets an
//! empty deck, the same as when nothing matches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::dispatch::{DecisionDispatcher, DispatchStats};
use deck::{Gesture, Outcome, SwipeInput, SwipeQueue};
use pipeline::{CardAnnotator, CardDetails, FilterPipeline};
use pod_model::{Pod, PodId};
use sources::user_context::build_user_context;
use sources::{GeolocationProvider, PodSource, UserContext};

/// A loaded deck: the queue plus display details keyed by pod id.
#[derive(Debug, Default)]
pub struct Deck {
    pub queue: SwipeQueue,
    pub details: HashMap<PodId, CardDetails>,
}

impl Deck {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn details_for(&self, pod: &Pod) -> Option<&CardDetails> {
        self.details.get(&pod.id)
    }
}

/// Builds decks from the configured collaborators.
#[derive(Clone)]
pub struct DeckLoader {
    source: Arc<dyn PodSource>,
    geolocation: Arc<dyn GeolocationProvider>,
    filter_pipeline: Arc<FilterPipeline>,
    annotator: CardAnnotator,
    max_distance_m: Option<f64>,
}

impl DeckLoader {
    /// Create a loader with the standard filters (tag overlap, then distance).
    pub fn new(
        source: Arc<dyn PodSource>,
        geolocation: Arc<dyn GeolocationProvider>,
        max_distance_m: Option<f64>,
    ) -> Self {
        Self {
            source,
            geolocation,
            filter_pipeline: Arc::new(FilterPipeline::standard()),
            annotator: CardAnnotator::new(),
            max_distance_m,
        }
    }

    /// Replace the filter pipeline.
    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.filter_pipeline = Arc::new(pipeline);
        self
    }

    /// Load a fresh deck.
    ///
    /// # Returns
    /// * `Ok(Deck)` - possibly empty if a fetch failed or nothing matched
    /// * `Err` - only if the filter pipeline itself fails
    pub async fn load(&self) -> Result<Deck> {
        let start_time = Instant::now();

        let context = match build_user_context(
            self.source.as_ref(),
            self.geolocation.as_ref(),
            self.max_distance_m,
        )
        .await
        {
            Ok(context) => context,
            Err(e) => {
                warn!("Could not build user context, showing empty deck: {:#}", e);
                return Ok(Deck::empty());
            }
        };

        let pods = match self.source.get_pods().await {
            Ok(pods) => pods,
            Err(e) => {
                warn!("Failed to fetch pods, showing empty deck: {}", e);
                return Ok(Deck::empty());
            }
        };
        info!("Fetched {} candidate pods", pods.len());

        let (kept, details) = self.filter_and_annotate(pods, context).await?;
        info!("Filtered deck has {} pods", kept.len());

        let deck = Deck {
            queue: SwipeQueue::from_pods(kept),
            details: details
                .into_iter()
                .map(|d| (d.pod_id.clone(), d))
                .collect(),
        };

        info!("Loaded deck in {:.2?}", start_time.elapsed());
        Ok(deck)
    }

    /// Run the CPU-bound stages on the blocking pool.
    async fn filter_and_annotate(
        &self,
        pods: Vec<Pod>,
        context: UserContext,
    ) -> Result<(Vec<Pod>, Vec<CardDetails>)> {
        let pipeline = self.filter_pipeline.clone();
        let annotator = self.annotator.clone();

        tokio::task::spawn_blocking(move || {
            let kept = pipeline
                .apply(pods, &context)
                .context("Failed to filter pods")?;
            let details = annotator.annotate(&kept, &context);
            Ok::<_, anyhow::Error>((kept, details))
        })
        .await
        .context("Filter task panicked")?
    }
}

/// The card on top of the deck as the UI shows it.
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub pod: &'a Pod,
    pub details: Option<&'a CardDetails>,
    /// Cards left including this one
    pub remaining: usize,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub dispatch: DispatchStats,
}

/// One pass over a deck.
///
/// Input on an empty deck is ignored rather than treated as an error.
pub struct SwipeSession {
    deck: Deck,
    dispatcher: DecisionDispatcher,
}

impl SwipeSession {
    pub fn new(deck: Deck, dispatcher: DecisionDispatcher) -> Self {
        Self { deck, dispatcher }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn remaining(&self) -> usize {
        self.deck.queue.len()
    }

    pub fn current_card(&self) -> Option<CardView<'_>> {
        let pod = self.deck.queue.current()?;
        Some(CardView {
            pod,
            details: self.deck.details_for(pod),
            remaining: self.deck.queue.len(),
        })
    }

    /// Drag released. Returns the outcome if the gesture committed.
    pub fn handle_drag(&mut self, gesture: Gesture) -> Result<Option<Outcome>> {
        self.handle(SwipeInput::Drag(gesture))
    }

    /// Accept/reject button pressed. Buttons always commit.
    pub fn handle_button(&mut self, outcome: Outcome) -> Result<Option<Outcome>> {
        self.handle(SwipeInput::Button(outcome))
    }

    fn handle(&mut self, input: SwipeInput) -> Result<Option<Outcome>> {
        if self.deck.queue.current().is_none() {
            debug!("Deck is empty, ignoring {:?}", input);
            return Ok(None);
        }

        let Some(decision) = self.deck.queue.swipe(input)? else {
            return Ok(None);
        };
        let outcome = decision.outcome;
        info!("{} pod {}", outcome, decision.pod.id);

        if let Err(e) = self.dispatcher.send(decision) {
            warn!("Decision not reported: {}", e);
        }
        Ok(Some(outcome))
    }

    /// Stop the session and wait for pending reports to finish.
    pub async fn finish(self) -> Result<SessionSummary> {
        let (accepted, rejected) =
            self.deck
                .queue
                .decided()
                .fold((0, 0), |(a, r), (_, outcome)| match outcome {
                    Outcome::Accept => (a + 1, r),
                    Outcome::Reject => (a, r + 1),
                });
        let dispatch = self
            .dispatcher
            .shutdown()
            .await
            .context("Failed to drain decision dispatcher")?;

        Ok(SessionSummary {
            accepted,
            rejected,
            dispatch,
        })
    }
}
