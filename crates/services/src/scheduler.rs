use crate::chat::ChatClient;
use crate::formatter::{format_quote_line, format_report};
use crate::price_source::PriceSource;
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use stockbot_models::{ScheduleRule, Watchlist};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Trigger granularity is one minute, so polling once a minute is enough.
const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Background task that pushes the daily market-open report.
///
/// Owns all of its mutable state (`last_fired`); the request path never
/// sees this struct, only the shared immutable watchlist and collaborators.
pub struct BroadcastScheduler {
    watchlist: Watchlist,
    rule: ScheduleRule,
    price_source: Arc<dyn PriceSource>,
    chat: Arc<dyn ChatClient>,
    last_fired: Option<NaiveDate>,
}

impl BroadcastScheduler {
    pub fn new(
        watchlist: Watchlist,
        rule: ScheduleRule,
        price_source: Arc<dyn PriceSource>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            watchlist,
            rule,
            price_source,
            chat,
            last_fired: None,
        }
    }

    /// Poll loop, cancelled at process shutdown.
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!(
            hour = self.rule.hour,
            minute = self.rule.minute,
            instruments = self.watchlist.instrument_count(),
            "⏰ Broadcast scheduler started"
        );

        let mut ticker = interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("⏰ Broadcast scheduler stopping");
                    break;
                }
                _ = ticker.tick() => {
                    self.poll(Local::now().naive_local()).await;
                }
            }
        }
    }

    /// One wake tick. Fires when the current minute matches the rule and
    /// nothing has fired yet today; the date check makes the fired flag
    /// reset itself at local midnight. Returns whether a broadcast went out.
    pub async fn poll(&mut self, now: NaiveDateTime) -> bool {
        if !self.rule.matches_minute(now.time()) {
            return false;
        }
        if self.last_fired == Some(now.date()) {
            return false;
        }

        // Mark before broadcasting: a failed delivery still counts as
        // today's attempt, otherwise every tick in the trigger minute
        // would re-send.
        self.last_fired = Some(now.date());

        let report = self.build_report().await;
        match self.chat.broadcast(&report).await {
            Ok(()) => tracing::info!(date = %now.date(), "📣 Daily report broadcast sent"),
            Err(e) => tracing::error!(error = %e, "❌ Daily report broadcast failed"),
        }
        true
    }

    /// Fetches every watchlist entry and assembles the report. A failed
    /// fetch degrades to an inline error line; it never aborts the rest.
    async fn build_report(&self) -> String {
        let mut sections = Vec::with_capacity(self.watchlist.categories.len());
        for category in &self.watchlist.categories {
            let mut lines = Vec::with_capacity(category.instrument_ids.len());
            for instrument_id in &category.instrument_ids {
                let result = self.price_source.fetch(instrument_id).await;
                if let Err(e) = &result {
                    tracing::warn!(instrument_id, error = %e, "📉 Report fetch failed, degrading to error line");
                }
                lines.push(format_quote_line(instrument_id, &result));
            }
            sections.push((category.clone(), lines));
        }
        format_report(&sections)
    }
}
