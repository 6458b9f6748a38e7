//! Simulation report generation.

use crate::game::{EndReason, GameOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from a batch of games.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub agent: String,
    pub grid_size: i32,
    pub num_runs: u32,
    pub wins: u32,

    // Aggregated stats
    pub avg_score: f64,
    pub avg_moves: f64,
    pub avg_length: f64,
    pub max_score: u32,
    pub min_score: u32,
    /// Moves per food eaten, over all games.
    pub moves_per_food: f64,

    pub end_reasons: BTreeMap<EndReason, u32>,

    // Individual outcomes for detailed analysis
    pub outcomes: Vec<GameOutcome>,
}

impl SimReport {
    /// Create a new report from finished games.
    pub fn from_outcomes(agent: &str, grid_size: i32, outcomes: Vec<GameOutcome>) -> Self {
        let num_runs = outcomes.len() as u32;
        let runs = num_runs.max(1) as f64;
        let wins = outcomes.iter().filter(|o| o.won()).count() as u32;

        let total_score: u64 = outcomes.iter().map(|o| o.score as u64).sum();
        let total_moves: u64 = outcomes.iter().map(|o| o.moves).sum();
        let avg_score = total_score as f64 / runs;
        let avg_moves = total_moves as f64 / runs;
        let avg_length = outcomes.iter().map(|o| o.length as f64).sum::<f64>() / runs;
        let max_score = outcomes.iter().map(|o| o.score).max().unwrap_or(0);
        let min_score = outcomes.iter().map(|o| o.score).min().unwrap_or(0);
        let moves_per_food = if total_score > 0 {
            total_moves as f64 / total_score as f64
        } else {
            0.0
        };

        let mut end_reasons = BTreeMap::new();
        for outcome in &outcomes {
            *end_reasons.entry(outcome.end).or_insert(0) += 1;
        }

        Self {
            agent: agent.to_string(),
            grid_size,
            num_runs,
            wins,
            avg_score,
            avg_moves,
            avg_length,
            max_score,
            min_score,
            moves_per_food,
            end_reasons,
            outcomes,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.num_runs == 0 {
            0.0
        } else {
            self.wins as f64 / self.num_runs as f64
        }
    }

    /// Median score, lower middle for even counts.
    pub fn median_score(&self) -> u32 {
        let mut scores: Vec<u32> = self.outcomes.iter().map(|o| o.score).collect();
        scores.sort_unstable();
        scores.get(scores.len().saturating_sub(1) / 2).copied().unwrap_or(0)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!(
            "               agent: {}  grid: {}x{}\n",
            self.agent, self.grid_size, self.grid_size
        ));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Games: {} total, {} won ({:.1}%)\n\n",
            self.num_runs,
            self.wins,
            self.win_rate() * 100.0
        ));

        report.push_str("── SCORE ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:       {:.2}\n", self.avg_score));
        report.push_str(&format!("  Min Score:       {}\n", self.min_score));
        report.push_str(&format!("  Median Score:    {}\n", self.median_score()));
        report.push_str(&format!("  Max Score:       {}\n", self.max_score));
        report.push_str(&format!("  Avg Length:      {:.1}\n", self.avg_length));
        report.push_str(&format!("  Avg Moves:       {:.0}\n", self.avg_moves));
        report.push_str(&format!("  Moves per Food:  {:.1}\n\n", self.moves_per_food));

        report.push_str("── END REASONS ──────────────────────────────────────────────────\n");
        for (reason, count) in &self.end_reasons {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<15} {:>5.1}% {}\n", reason.as_str(), pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
